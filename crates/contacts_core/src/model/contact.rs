//! Contact domain model.
//!
//! # Responsibility
//! - Define the person record managed by the contact book.
//! - Own the opt-in validation rules for names and phone numbers.
//!
//! # Invariants
//! - Construction never validates; `validate()` must be called explicitly.
//! - Identity is the ordered `(first_name, last_name)` pair, never a
//!   generated id.
//! - Validation is read-only and reports the first violation only.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Minimum number of digits a normalized phone number must carry.
pub const MIN_PHONE_DIGITS: usize = 10;

static PHONE_DECORATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[+()\s]").expect("valid phone decoration regex"));

/// Validation error for contact names and phone numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    /// Phone number is too short or contains non-digit characters once
    /// `+`, parentheses and whitespace are stripped.
    InvalidPhoneNumber { phone_number: String },
    /// First name or last name is empty.
    EmptyName,
    /// First name or last name contains punctuation or digits.
    InvalidName {
        first_name: String,
        last_name: String,
    },
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPhoneNumber { phone_number } => {
                write!(f, "invalid phone number `{phone_number}`")
            }
            Self::EmptyName => write!(f, "first name and last name cannot be empty"),
            Self::InvalidName {
                first_name,
                last_name,
            } => write!(f, "invalid name `{first_name} {last_name}`"),
        }
    }
}

impl Error for ContactValidationError {}

/// Natural key used by stores to identify a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NaturalKey<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
}

/// Person record with optional phone number and postal address.
///
/// Two contacts sharing first and last name are the same contact as far as
/// lookup and deletion are concerned, even if phone or address differ.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub address: String,
}

impl Contact {
    /// Creates a contact with empty phone number and address.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone_number: String::new(),
            address: String::new(),
        }
    }

    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = phone_number.into();
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Returns `"<first_name> <last_name>"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns the `(first_name, last_name)` lookup key.
    pub fn natural_key(&self) -> NaturalKey<'_> {
        NaturalKey {
            first_name: &self.first_name,
            last_name: &self.last_name,
        }
    }

    /// Short form used in log lines; never includes phone or address.
    pub fn summary(&self) -> String {
        format!("Contact({}, {})", self.first_name, self.last_name)
    }

    /// Runs every check and stops at the first violation.
    ///
    /// # Errors
    /// - `InvalidPhoneNumber` is reported before any name error.
    /// - `EmptyName` is reported before `InvalidName`.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        self.check_phone_number()?;
        self.check_names()
    }

    /// Checks that the normalized phone number is long enough and made of
    /// ASCII digits only.
    pub fn check_phone_number(&self) -> Result<(), ContactValidationError> {
        let normalized = normalize_phone_number(&self.phone_number);
        let long_enough = normalized.chars().count() >= MIN_PHONE_DIGITS;
        if !long_enough || !normalized.chars().all(|c| c.is_ascii_digit()) {
            return Err(ContactValidationError::InvalidPhoneNumber {
                phone_number: self.phone_number.clone(),
            });
        }
        Ok(())
    }

    /// Checks that both names are present and free of punctuation/digits.
    pub fn check_names(&self) -> Result<(), ContactValidationError> {
        if self.first_name.is_empty() || self.last_name.is_empty() {
            return Err(ContactValidationError::EmptyName);
        }

        let has_forbidden_char = self
            .first_name
            .chars()
            .chain(self.last_name.chars())
            .any(|c| c.is_ascii_punctuation() || c.is_numeric());
        if has_forbidden_char {
            return Err(ContactValidationError::InvalidName {
                first_name: self.first_name.clone(),
                last_name: self.last_name.clone(),
            });
        }

        Ok(())
    }
}

impl Display for Contact {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - tel: {} - address: {}",
            self.full_name(),
            self.phone_number,
            self.address
        )
    }
}

/// Strips `+`, parentheses and whitespace from a phone number.
pub fn normalize_phone_number(phone_number: &str) -> String {
    PHONE_DECORATION_RE.replace_all(phone_number, "").into_owned()
}
