//! Contact details (email, phone) from resume text

use regex::Regex;
use serde::{Deserialize, Serialize};

pub const NOT_FOUND: &str = "Not found";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    email: Option<String>,
    phone: Option<String>,
}

impl ContactInfo {
    pub fn new(email: Option<String>, phone: Option<String>) -> Self {
        Self { email, phone }
    }

    /// The first email address in the text, or `"Not found"`.
    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or(NOT_FOUND)
    }

    /// The first phone-like digit run in the text, or `"Not found"`.
    pub fn phone(&self) -> &str {
        self.phone.as_deref().unwrap_or(NOT_FOUND)
    }

    pub fn has_email(&self) -> bool {
        self.email.is_some()
    }

    pub fn has_phone(&self) -> bool {
        self.phone.is_some()
    }
}

/// First-match extraction with no validation or normalisation.
pub struct ContactExtractor {
    email_regex: Regex,
    phone_regex: Regex,
}

impl Default for ContactExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactExtractor {
    pub fn new() -> Self {
        let email_regex = Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
            .expect("Invalid email regex");

        // optional +, a digit, 7+ digits/spaces/hyphens, a closing digit
        let phone_regex = Regex::new(r"\+?\d[\d\s-]{7,}\d")
            .expect("Invalid phone regex");

        Self {
            email_regex,
            phone_regex,
        }
    }

    pub fn extract(&self, text: &str) -> ContactInfo {
        ContactInfo {
            email: self.email_regex.find(text).map(|m| m.as_str().to_string()),
            phone: self.phone_regex.find(text).map(|m| m.as_str().to_string()),
        }
    }
}
