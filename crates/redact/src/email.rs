use std::{borrow::Cow, sync::LazyLock};

use regex::Regex;

use crate::Matcher;

/// `local@domain.tld`, top-level label of two or more letters. Boundaries are
/// ASCII-only, so an address glued to a non-ASCII letter is still caught.
#[allow(clippy::expect_used)]
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u:\b)[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}(?-u:\b)")
        .expect("valid e-mail pattern")
});

/// Masks e-mail addresses.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailMatcher;

impl EmailMatcher {
    pub fn new() -> Self {
        Self
    }
}

impl Matcher for EmailMatcher {
    fn name(&self) -> &'static str {
        "email"
    }

    fn replace_all<'t>(&self, text: &'t str, mask: &str) -> Cow<'t, str> {
        EMAIL.replace_all(text, regex::NoExpand(mask))
    }
}
