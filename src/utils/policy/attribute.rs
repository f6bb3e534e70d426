//! The two concrete attribute-identifier flavors the MSP compiler supports.
use crate::error::RabeError;
use std::fmt::Debug;

/// An opaque attribute token. The compiler is generic over this so the same
/// grammar and Lewko-Waters construction serve both the integer-attribute
/// schemes (GPSW) and the string-attribute ones (FAME, MA-ABE).
pub trait AttributeIdentifier: Clone + Eq + Debug {
    /// Parses a single attribute token, already trimmed of whitespace and
    /// guaranteed non-empty.
    fn parse_token(token: &str) -> Result<Self, RabeError>
    where
        Self: Sized;
}

impl AttributeIdentifier for u64 {
    fn parse_token(token: &str) -> Result<u64, RabeError> {
        token
            .parse::<u64>()
            .map_err(|_| RabeError::new(&format!("not an integer attribute: {:?}", token)))
    }
}

impl AttributeIdentifier for String {
    fn parse_token(token: &str) -> Result<String, RabeError> {
        let valid = token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == ':' || c == '_');
        if !valid {
            return Err(RabeError::new(&format!(
                "not a valid attribute token: {:?}",
                token
            )));
        }
        Ok(token.to_string())
    }
}
