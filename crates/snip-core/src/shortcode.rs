use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt::Display;

/// A short token standing in for a full URL.
///
/// Tokens are opaque to the rest of the system: the only rule enforced here
/// is that they are non-empty. Their alphabet is whatever the configured
/// [`Encoder`](crate::Encoder) produces.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortCode(String);

impl ShortCode {
    /// Creates a new `ShortCode`, rejecting empty input.
    pub fn new(code: impl Into<String>) -> Result<Self, CoreError> {
        let code = code.into();
        if code.is_empty() {
            return Err(CoreError::EmptyInput("short code"));
        }
        Ok(Self(code))
    }

    /// Wraps encoder output as is.
    ///
    /// Both encoders emit at least one character for a non-empty URL, and
    /// they reject empty URLs before getting here.
    pub fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Joins `base_url` and the code into the link handed to clients.
    ///
    /// The code is percent-encoded so base64 codes containing `/`, `+` or
    /// `=` stay a single path segment.
    pub fn to_url(&self, base_url: &str) -> String {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            urlencoding::encode(&self.0)
        )
    }

    /// Returns the short code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the code with a disambiguating suffix appended, e.g. `abc123-2`.
    pub fn with_suffix(&self, n: u32) -> Self {
        Self(format!("{}-{}", self.0, n))
    }
}

impl Borrow<str> for ShortCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ShortCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_codes() {
        assert!(ShortCode::new("lhLnJ1").is_ok());
        assert!(ShortCode::new("NvbQ==").is_ok());
        assert!(ShortCode::new("a").is_ok());
    }

    #[test]
    fn empty_code_is_rejected() {
        assert_eq!(
            ShortCode::new("").unwrap_err(),
            CoreError::EmptyInput("short code")
        );
    }

    #[test]
    fn display() {
        let code = ShortCode::new("my-code").unwrap();
        assert_eq!(code.to_string(), "my-code");
    }

    #[test]
    fn to_url() {
        let code = ShortCode::new("abc123").unwrap();
        assert_eq!(code.to_url("http://localhost:8080"), "http://localhost:8080/abc123");
        assert_eq!(code.to_url("http://localhost:8080/"), "http://localhost:8080/abc123");
    }

    #[test]
    fn to_url_keeps_code_in_one_segment() {
        let code = ShortCode::new_unchecked("AmeT0/");
        assert_eq!(code.to_url("http://localhost:8080"), "http://localhost:8080/AmeT0%2F");

        let code = ShortCode::new_unchecked("NvbQ==");
        assert_eq!(code.to_url("http://localhost:8080"), "http://localhost:8080/NvbQ%3D%3D");

        let code = ShortCode::new_unchecked("lhLnJ1-2");
        assert_eq!(code.to_url("http://localhost:8080"), "http://localhost:8080/lhLnJ1-2");
    }

    #[test]
    fn suffix() {
        let code = ShortCode::new_unchecked("lhLnJ1");
        assert_eq!(code.with_suffix(1).as_str(), "lhLnJ1-1");
        assert_eq!(code.with_suffix(12).as_str(), "lhLnJ1-12");
    }

    #[test]
    fn serializes_as_plain_string() {
        let code = ShortCode::new("lhLnJ1").unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"lhLnJ1\"");
    }
}
