//! Masking of personally identifiable fragments in free text.
//!
//! A [`Redactor`] runs an ordered list of [`Matcher`] policies over a string,
//! replacing every match with [`MASK`]. The default policy masks e-mail
//! addresses first and phone numbers second.

pub mod email;
pub mod phone;

use std::borrow::Cow;

pub use {email::EmailMatcher, phone::PhoneMatcher};

/// Sentinel written in place of every masked fragment.
///
/// Contains neither digits nor `@`, so no built-in matcher ever matches it.
pub const MASK: &str = "<<##removed##>>";

/// A single masking policy.
pub trait Matcher: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Replace every match in `text` with `mask`.
    fn replace_all<'t>(&self, text: &'t str, mask: &str) -> Cow<'t, str>;
}

/// Applies matchers in order, each over the output of the previous one.
pub struct Redactor {
    matchers: Vec<Box<dyn Matcher>>,
    mask: String,
}

impl Redactor {
    /// Build a redactor from an explicit matcher chain.
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self {
            matchers,
            mask: MASK.to_string(),
        }
    }

    /// Use a different sentinel.
    #[must_use]
    pub fn with_mask(mut self, mask: impl Into<String>) -> Self {
        self.mask = mask.into();
        self
    }

    /// Mask all sensitive fragments in `text`.
    pub fn mask(&self, text: &str) -> String {
        let mut current = Cow::Borrowed(text);
        for matcher in &self.matchers {
            if let Cow::Owned(replaced) = matcher.replace_all(&current, &self.mask) {
                tracing::trace!(matcher = matcher.name(), "masked fragment");
                current = Cow::Owned(replaced);
            }
        }
        current.into_owned()
    }
}

impl Default for Redactor {
    /// E-mail pass, then phone pass.
    fn default() -> Self {
        Self::new(vec![
            Box::new(EmailMatcher::new()),
            Box::new(PhoneMatcher::new()),
        ])
    }
}

impl std::fmt::Debug for Redactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.matchers.iter().map(|m| m.name()).collect();
        f.debug_struct("Redactor")
            .field("matchers", &names)
            .field("mask", &self.mask)
            .finish()
    }
}
