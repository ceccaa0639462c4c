//! Client-side rules for the contact form fields.
//!
//! A rule is read off the control's own HTML constraints (`required`,
//! `type="email"`). It is only consulted when the platform has no native
//! constraint validation for the control; otherwise `checkValidity()` is the
//! verdict.

use crate::dom::Element;
use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// `type="email"`: a single address per the HTML living standard
    Email,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub required: bool,
    pub kind: FieldKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Missing,
    Malformed,
}

static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();

/// The "valid e-mail address" production of the HTML standard.
fn email_pattern() -> &'static Regex {
    EMAIL_PATTERN.get_or_init(|| {
        Regex::new(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
        )
        .expect("email pattern is valid")
    })
}

impl FieldRule {
    /// Rule declared by the control's markup.
    pub fn for_input<E: Element>(input: &E) -> FieldRule {
        let kind = match input.attr("type") {
            Some(t) if t.eq_ignore_ascii_case("email") => FieldKind::Email,
            _ => FieldKind::Text,
        };
        FieldRule {
            required: input.attr("required").is_some(),
            kind,
        }
    }

    pub fn check(&self, value: &str) -> Result<(), FieldError> {
        // Email inputs sanitize away surrounding whitespace; text keeps it
        let value = match self.kind {
            FieldKind::Email => value.trim_matches(|c: char| c.is_ascii_whitespace()),
            FieldKind::Text => value,
        };
        if value.is_empty() {
            return if self.required {
                Err(FieldError::Missing)
            } else {
                Ok(())
            };
        }
        match self.kind {
            FieldKind::Email if !email_pattern().is_match(value) => Err(FieldError::Malformed),
            _ => Ok(()),
        }
    }
}
