//! A library of pairing-based Attribute-Based Encryption schemes over a
//! Type-3 BN-256 curve.
//!
//! Four protocols share a common policy front-end (`utils::policy`, an
//! MSP compiler for monotone boolean expressions) and a common
//! reconstruction kernel (`utils::gaussian`):
//!
//! - [`schemes::gpsw`]: textbook key-policy ABE.
//! - [`schemes::fame`]: ciphertext-policy ABE with fast decryption.
//! - [`schemes::dippe`]: decentralized inner-product predicate encryption.
//! - [`schemes::maabe`]: multi-authority ciphertext-policy ABE with global
//!   user identifiers.
//!
//! Byte-string plaintexts are carried through a hybrid AES-CBC envelope
//! (`utils::envelope`) wrapping a target-group session key.
pub mod error;
pub mod schemes;
pub mod utils;

pub use error::RabeError;
pub use utils::policy::{boolean_to_msp, Msp};
