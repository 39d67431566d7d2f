//! Phone numbers typed into lead forms.

use core::fmt;

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    #[error("phone cannot be empty")]
    Empty,
    #[error("phone contains an invalid character: {0:?}")]
    InvalidCharacter(char),
    #[error("phone must have between {min} and {max} digits")]
    Length { min: usize, max: usize },
}

/// A phone number reduced to its digits.
///
/// Spaces, `-`, `(`, `)` and a single leading `+` are accepted as
/// formatting and dropped. `"+54 (351) 424-5041"` becomes `543514245041`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    pub const MIN_DIGITS: usize = 6;
    pub const MAX_DIGITS: usize = 20;

    /// Parse a phone number.
    ///
    /// # Errors
    ///
    /// Returns a [`PhoneError`] if the input is blank, contains characters
    /// other than digits and formatting, or has too few or too many digits.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PhoneError::Empty);
        }

        let body = s.strip_prefix('+').unwrap_or(s);
        let mut digits = String::with_capacity(body.len());
        for c in body.chars() {
            match c {
                '0'..='9' => digits.push(c),
                ' ' | '-' | '(' | ')' => {}
                other => return Err(PhoneError::InvalidCharacter(other)),
            }
        }

        if !(Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digits.len()) {
            return Err(PhoneError::Length {
                min: Self::MIN_DIGITS,
                max: Self::MAX_DIGITS,
            });
        }

        Ok(Self(digits))
    }

    /// Digits only.
    #[must_use]
    pub fn digits(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl core::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strips_formatting() {
        let phone = Phone::parse(" +54 (351) 424-5041 ").unwrap();
        assert_eq!(phone.digits(), "543514245041");
        assert_eq!(Phone::parse("351-4245041").unwrap().to_string(), "3514245041");
    }

    #[test]
    fn test_parse_rejects_letters_and_inner_plus() {
        assert_eq!(
            Phone::parse("351-ABC-5041"),
            Err(PhoneError::InvalidCharacter('A'))
        );
        assert_eq!(
            Phone::parse("54+3514245041"),
            Err(PhoneError::InvalidCharacter('+'))
        );
    }

    #[test]
    fn test_parse_length_bounds() {
        assert_eq!(Phone::parse(""), Err(PhoneError::Empty));
        assert!(matches!(Phone::parse("12345"), Err(PhoneError::Length { .. })));
        assert!(Phone::parse("123456").is_ok());
        assert!(matches!(
            Phone::parse(&"9".repeat(21)),
            Err(PhoneError::Length { .. })
        ));
    }
}
