//! The single error type returned by every fallible operation in this crate.
use std::fmt;

/// An error raised by policy parsing, the linear-algebra kernel or one of the
/// ABE schemes. Every public operation returns `Result<_, RabeError>`; there
/// is no panicking path for user-controlled input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RabeError {
    message: String,
}

impl RabeError {
    pub fn new(message: &str) -> RabeError {
        RabeError {
            message: message.to_string(),
        }
    }
}

impl fmt::Display for RabeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for RabeError {}

impl From<std::num::ParseIntError> for RabeError {
    fn from(e: std::num::ParseIntError) -> RabeError {
        RabeError::new(&format!("could not parse integer attribute: {}", e))
    }
}
