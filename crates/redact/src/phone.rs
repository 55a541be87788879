use std::{borrow::Cow, sync::LazyLock};

use regex::Regex;

use crate::Matcher;

/// Optional `+CC`, optional `(area)`, then a run of three or more digits
/// followed by one or two groups of two or more digits. Word boundaries are
/// ASCII-only: a letter like `ü` next to the digits does not block a match.
#[allow(clippy::expect_used)]
static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:\+[0-9]{1,3}\s*)?(?:\([0-9]{1,5}\)\s*)?(?-u:\b)(?P<digits>[0-9]{3,}(?:[-\s./]?[0-9]{2,}){1,2})(?-u:\b)",
    )
    .expect("valid phone pattern")
});

/// Word characters, a dot, and a 2-6 letter extension (`file12.doc`).
#[allow(clippy::expect_used)]
static FILENAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-z0-9]+\.[a-z]{2,6}(?-u:\b)").expect("valid filename pattern"));

/// Masks phone-number-like digit sequences.
///
/// A candidate whose digit run starts a filename-looking token is skipped and
/// the scan resumes one character after the candidate's start.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhoneMatcher;

impl PhoneMatcher {
    pub fn new() -> Self {
        Self
    }
}

/// True when `rest` begins with something like `report1.pdf`.
pub fn looks_like_filename(rest: &str) -> bool {
    FILENAME.is_match(rest)
}

impl Matcher for PhoneMatcher {
    fn name(&self) -> &'static str {
        "phone"
    }

    fn replace_all<'t>(&self, text: &'t str, mask: &str) -> Cow<'t, str> {
        let mut out = String::new();
        let mut replaced = false;
        let mut copied_to = 0;
        let mut pos = 0;

        while pos <= text.len() {
            let Some(caps) = PHONE.captures_at(text, pos) else {
                break;
            };
            let (Some(whole), Some(digits)) = (caps.get(0), caps.name("digits")) else {
                break;
            };

            if looks_like_filename(&text[digits.start()..]) {
                pos = next_char(text, whole.start());
                continue;
            }

            out.push_str(&text[copied_to..whole.start()]);
            out.push_str(mask);
            copied_to = whole.end();
            pos = whole.end();
            replaced = true;
        }

        if !replaced {
            return Cow::Borrowed(text);
        }
        out.push_str(&text[copied_to..]);
        Cow::Owned(out)
    }
}

fn next_char(text: &str, at: usize) -> usize {
    text[at..]
        .chars()
        .next()
        .map_or(text.len() + 1, |c| at + c.len_utf8())
}
