//! # avalanche-tx-builder
//!
//! Foundational types for constructing, signing, and serializing Avalanche
//! transactions: the X-chain (AVM), P-chain (PlatformVM), and the atomic
//! import/export dialect shared with the C-chain (EVM).
//!
//! Modules for CB58/bech32 formatting, hashing, the binary wire codec, and
//! secp256k1 key management are all provided.
#![cfg_attr(docsrs, feature(doc_cfg))]
pub mod avm;
pub mod codec;
pub mod constants;
pub mod errors;
pub mod evm;
pub mod formatting;
pub mod hash;
pub mod ids;
pub mod key;
pub mod packer;
pub mod platformvm;
pub mod txs;
pub mod units;
pub mod verify;
