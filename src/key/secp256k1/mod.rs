//! secp256k1 keys: generation, signing, address derivation, and keychains.
pub mod address;
pub mod keychain;
pub mod private_key;
pub mod public_key;
pub mod signature;
pub mod txs;

use std::collections::HashMap;

use async_trait::async_trait;
use k256::ecdsa::SigningKey;
use serde::{Deserialize, Serialize};

use crate::{errors::Result, ids::short};

/// This crate only ever produces hot (in-memory) keys; the variant exists so
/// serialized `Info` stays forward-compatible with remote-signer key types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyType {
    Hot,
}

/// Bech32 addresses for a single network, one per chain alias.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainAddresses {
    pub x: String,
    pub p: String,
}

/// Describes a key without exposing signing capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Info {
    pub id: Option<String>,
    pub key_type: KeyType,

    pub private_key_cb58: Option<String>,
    pub private_key_hex: Option<String>,

    pub addresses: HashMap<u32, ChainAddresses>,

    pub short_address: short::Id,
    pub eth_address: String,
    pub h160_address: primitive_types::H160,
}

/// Capability to sign a pre-hashed digest.
///
/// Async so a future I/O-bound signer (e.g. a remote KMS) can implement this
/// trait without changing its shape; the in-scope `secp256k1::private_key::Key`
/// never actually awaits.
#[async_trait]
pub trait SignOnly {
    fn signing_key(&self) -> Result<SigningKey>;
    async fn sign_digest(&self, digest: &[u8]) -> Result<[u8; 65]>;
}

/// Capability to derive addresses/metadata without access to the private scalar.
pub trait ReadOnly {
    fn key_type(&self) -> KeyType;
    fn hrp_address(&self, network_id: u32, chain_id_alias: &str) -> Result<String>;
    fn short_address(&self) -> Result<short::Id>;
    fn short_address_bytes(&self) -> Result<Vec<u8>>;
    fn eth_address(&self) -> String;
    fn h160_address(&self) -> primitive_types::H160;
}
