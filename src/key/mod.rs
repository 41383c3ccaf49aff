//! APIs for cryptographic operations on Avalanche.
//!
//! Includes both BLS and secp256k1 keys.
pub mod bls;
pub mod secp256k1;
