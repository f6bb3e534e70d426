//! The four pairing-based ABE protocols, each built from the shared
//! `utils::policy` MSP compiler and `utils::gaussian` reconstruction kernel.
pub mod dippe;
pub mod fame;
pub mod gpsw;
pub mod maabe;
