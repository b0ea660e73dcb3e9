//! Input Validation
//!
//! Pure parse functions for the contact-detail fields this backend accepts.
//! Each function takes raw input and returns either a normalized newtype or a
//! [`ValidationError`] naming the field and a machine-readable code. There is
//! no trait hierarchy; validation is parsing.
//!
//! # Usage
//!
//! ```ignore
//! use wicket::validation::{parse_email, parse_phone, parse_postal_code};
//!
//! let email = parse_email("  Alice@Example.COM ")?;   // "alice@example.com"
//! let phone = parse_phone("(555) 123-4567")?;          // "+525551234567"
//! let postal = parse_postal_code("06600")?;
//! ```

use std::fmt;

/// Validation error with field context
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Field that failed validation
    pub field: &'static str,
    /// Error code for programmatic handling
    pub code: ValidationErrorCode,
    /// Human-readable message
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, code: ValidationErrorCode, message: impl Into<String>) -> Self {
        Self {
            field,
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validation error codes for programmatic handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorCode {
    /// Value is required but missing/empty
    Required,
    /// Value is too long
    TooLong,
    /// Value contains invalid characters
    InvalidCharacters,
    /// Value doesn't match expected pattern
    InvalidFormat,
    /// Value has the wrong length
    InvalidLength,
}

impl fmt::Display for ValidationErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "required"),
            Self::TooLong => write!(f, "too_long"),
            Self::InvalidCharacters => write!(f, "invalid_characters"),
            Self::InvalidFormat => write!(f, "invalid_format"),
            Self::InvalidLength => write!(f, "invalid_length"),
        }
    }
}

// ============================================================================
// Email
// ============================================================================

/// A validated, lowercased email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// The normalized address
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Maximum accepted email length
pub const MAX_EMAIL_LEN: usize = 255;

/// Parse and normalize an email address.
///
/// Requires exactly one `@` with a non-empty local part and a domain that
/// contains a dot; trims surrounding whitespace and lowercases the result.
pub fn parse_email(raw: &str) -> Result<Email, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(
            "email",
            ValidationErrorCode::Required,
            "email must not be empty",
        ));
    }
    if trimmed.len() > MAX_EMAIL_LEN {
        return Err(ValidationError::new(
            "email",
            ValidationErrorCode::TooLong,
            format!("email must not exceed {} characters", MAX_EMAIL_LEN),
        ));
    }

    let mut parts = trimmed.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => {
            return Err(ValidationError::new(
                "email",
                ValidationErrorCode::InvalidFormat,
                "email must contain exactly one @",
            ))
        }
    };

    let domain_ok = match domain.find('.') {
        Some(i) => i > 0 && i + 1 < domain.len(),
        None => false,
    };
    if local.is_empty()
        || local.contains(char::is_whitespace)
        || domain.contains(char::is_whitespace)
        || !domain_ok
    {
        return Err(ValidationError::new(
            "email",
            ValidationErrorCode::InvalidFormat,
            "email format is invalid",
        ));
    }

    Ok(Email(trimmed.to_lowercase()))
}

// ============================================================================
// Phone number (Mexican numbering plan)
// ============================================================================

/// A validated phone number normalized to `+52XXXXXXXXXX`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// The normalized `+52…` form
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable form: `+52 (xxx) xxx-xxxx`
    pub fn formatted(&self) -> String {
        let digits = self.0.trim_start_matches("+52");
        if digits.len() == 10 {
            format!(
                "+52 ({}) {}-{}",
                &digits[..3],
                &digits[3..6],
                &digits[6..]
            )
        } else {
            self.0.clone()
        }
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse and normalize a Mexican phone number.
///
/// Accepts 10 digits, `52` + 10 digits, or `+52` + 10 digits, with optional
/// spaces, hyphens, and parentheses. Normalizes to `+52XXXXXXXXXX`.
pub fn parse_phone(raw: &str) -> Result<PhoneNumber, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::new(
            "phone",
            ValidationErrorCode::Required,
            "phone number must not be empty",
        ));
    }

    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();

    let digits = cleaned.strip_prefix('+').unwrap_or(&cleaned);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new(
            "phone",
            ValidationErrorCode::InvalidCharacters,
            "phone number may only contain digits",
        ));
    }

    let normalized = match (cleaned.starts_with('+'), digits.len()) {
        // Already +52XXXXXXXXXX
        (true, 12) if digits.starts_with("52") => cleaned.clone(),
        // 52XXXXXXXXXX without the plus
        (false, 12) if digits.starts_with("52") => format!("+{}", digits),
        // Bare national number
        (false, 10) => format!("+52{}", digits),
        _ => {
            return Err(ValidationError::new(
                "phone",
                ValidationErrorCode::InvalidLength,
                "phone number must have 10 digits",
            ))
        }
    };

    Ok(PhoneNumber(normalized))
}

// ============================================================================
// Postal code (Mexican, 5 digits)
// ============================================================================

/// A validated 5-digit postal code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostalCode(String);

impl PostalCode {
    /// The validated code
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the code falls within a numeric range (inclusive).
    pub fn is_in_range(&self, min: u32, max: u32) -> bool {
        self.0
            .parse::<u32>()
            .map(|n| n >= min && n <= max)
            .unwrap_or(false)
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse a Mexican postal code: exactly 5 digits, not starting with 0.
pub fn parse_postal_code(raw: &str) -> Result<PostalCode, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(
            "postal_code",
            ValidationErrorCode::Required,
            "postal code must not be empty",
        ));
    }
    if !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new(
            "postal_code",
            ValidationErrorCode::InvalidCharacters,
            "postal code may only contain digits",
        ));
    }
    if trimmed.len() != 5 {
        return Err(ValidationError::new(
            "postal_code",
            ValidationErrorCode::InvalidLength,
            "postal code must have exactly 5 digits",
        ));
    }
    if trimmed.starts_with('0') {
        return Err(ValidationError::new(
            "postal_code",
            ValidationErrorCode::InvalidFormat,
            "postal code must not start with 0",
        ));
    }

    Ok(PostalCode(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_normalizes_case_and_whitespace() {
        let email = parse_email("  Alice@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "alice@example.com");
    }

    #[test]
    fn test_email_rejects_bad_shapes() {
        assert_eq!(
            parse_email("").unwrap_err().code,
            ValidationErrorCode::Required
        );
        assert_eq!(
            parse_email("no-at-sign").unwrap_err().code,
            ValidationErrorCode::InvalidFormat
        );
        assert_eq!(
            parse_email("two@@example.com").unwrap_err().code,
            ValidationErrorCode::InvalidFormat
        );
        assert_eq!(
            parse_email("@example.com").unwrap_err().code,
            ValidationErrorCode::InvalidFormat
        );
        assert_eq!(
            parse_email("alice@nodot").unwrap_err().code,
            ValidationErrorCode::InvalidFormat
        );
        assert_eq!(
            parse_email("a b@example.com").unwrap_err().code,
            ValidationErrorCode::InvalidFormat
        );
    }

    #[test]
    fn test_email_length_limit() {
        let local = "a".repeat(MAX_EMAIL_LEN);
        let long = format!("{}@example.com", local);
        assert_eq!(
            parse_email(&long).unwrap_err().code,
            ValidationErrorCode::TooLong
        );
    }

    #[test]
    fn test_phone_normalizes_to_country_code() {
        assert_eq!(
            parse_phone("5551234567").unwrap().as_str(),
            "+525551234567"
        );
        assert_eq!(
            parse_phone("525551234567").unwrap().as_str(),
            "+525551234567"
        );
        assert_eq!(
            parse_phone("+525551234567").unwrap().as_str(),
            "+525551234567"
        );
        assert_eq!(
            parse_phone("(555) 123-4567").unwrap().as_str(),
            "+525551234567"
        );
    }

    #[test]
    fn test_phone_formatted() {
        let phone = parse_phone("5551234567").unwrap();
        assert_eq!(phone.formatted(), "+52 (555) 123-4567");
    }

    #[test]
    fn test_phone_rejects_bad_input() {
        assert_eq!(
            parse_phone("").unwrap_err().code,
            ValidationErrorCode::Required
        );
        assert_eq!(
            parse_phone("555-CALL-NOW").unwrap_err().code,
            ValidationErrorCode::InvalidCharacters
        );
        assert_eq!(
            parse_phone("123456789").unwrap_err().code,
            ValidationErrorCode::InvalidLength
        );
        // 12 digits that do not start with the country code
        assert_eq!(
            parse_phone("995551234567").unwrap_err().code,
            ValidationErrorCode::InvalidLength
        );
    }

    #[test]
    fn test_postal_code_accepts_valid() {
        let code = parse_postal_code("44100").unwrap();
        assert_eq!(code.as_str(), "44100");
        assert!(code.is_in_range(44000, 45000));
        assert!(!code.is_in_range(10000, 20000));
    }

    #[test]
    fn test_postal_code_rejects_bad_input() {
        assert_eq!(
            parse_postal_code("").unwrap_err().code,
            ValidationErrorCode::Required
        );
        assert_eq!(
            parse_postal_code("4410A").unwrap_err().code,
            ValidationErrorCode::InvalidCharacters
        );
        assert_eq!(
            parse_postal_code("441").unwrap_err().code,
            ValidationErrorCode::InvalidLength
        );
        assert_eq!(
            parse_postal_code("06600").unwrap_err().code,
            ValidationErrorCode::InvalidFormat
        );
    }
}
