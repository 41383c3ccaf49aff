//! C-chain atomic balance entries (EVMOutput/EVMInput) and the Export/Import
//! transaction builders that move value between them and the shared UTXO
//! model.
pub mod builder;
pub mod export;
pub mod import;

use std::cmp::Ordering;

use crate::{
    errors::Result,
    ids,
    ids::short,
    packer::{Packable, Packer},
    verify::Spendable,
};
use primitive_types::H160;
use serde::{Deserialize, Serialize};

/// Atomic balance entry produced by an ImportTx and spent by an ExportTx on
/// the C-chain. Unlike the X/P-chain UTXO outputs, this is a concrete struct
/// field (not a typed/tagged union), so it carries no type ID of its own.
/// ref. <https://pkg.go.dev/github.com/ava-labs/coreth/plugin/evm#EVMOutput>
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq, Clone)]
pub struct Output {
    #[serde(with = "crate::codec::serde::hex_0x_primitive_types_h160")]
    pub address: H160,
    pub amount: u64,
    #[serde(rename = "assetID")]
    pub asset_id: ids::Id,
}

impl Default for Output {
    fn default() -> Self {
        Self {
            address: H160::zero(),
            amount: 0,
            asset_id: ids::Id::empty(),
        }
    }
}

impl Output {
    pub fn new(address: H160, amount: u64, asset_id: ids::Id) -> Self {
        Self {
            address,
            amount,
            asset_id,
        }
    }

    /// The owner address, re-keyed as a 20-byte "short::Id" so it can be
    /// compared against the addresses held by a keychain.
    pub fn short_address(&self) -> short::Id {
        short::Id::from_slice(self.address.as_bytes())
    }

    pub fn unpack(packer: &Packer) -> Result<Self> {
        let address_bytes = packer.unpack_bytes(20)?;
        let amount = packer.unpack_u64()?;
        let asset_id_bytes = packer.unpack_bytes(ids::LEN)?;
        Ok(Self {
            address: H160::from_slice(&address_bytes),
            amount,
            asset_id: ids::Id::from_slice(&asset_id_bytes),
        })
    }
}

impl Packable for Output {
    fn pack(&self, packer: &Packer) -> Result<()> {
        packer.pack_bytes(self.address.as_bytes())?;
        packer.pack_u64(self.amount)?;
        packer.pack_bytes(self.asset_id.as_ref())?;
        Ok(())
    }
}

/// ref. <https://pkg.go.dev/github.com/ava-labs/coreth/plugin/evm#EVMOutput> sort order
impl Ord for Output {
    fn cmp(&self, other: &Output) -> Ordering {
        self.address
            .cmp(&other.address)
            .then_with(|| self.asset_id.cmp(&other.asset_id))
    }
}

impl PartialOrd for Output {
    fn partial_cmp(&self, other: &Output) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// An EVMOutput has exactly one owner and no locktime -- it is spendable
/// as soon as "from_addrs" contains that owner.
impl Spendable for Output {
    fn meets_threshold(&self, from_addrs: &[short::Id], _as_of: u64) -> bool {
        from_addrs.contains(&self.short_address())
    }

    fn spenders(&self, from_addrs: &[short::Id]) -> Vec<short::Id> {
        let owner = self.short_address();
        if from_addrs.contains(&owner) {
            vec![owner]
        } else {
            Vec::new()
        }
    }

    fn address_index(&self, addr: &short::Id) -> Option<u32> {
        if *addr == self.short_address() {
            Some(0)
        } else {
            None
        }
    }
}

/// Debits an EVM account balance to fund an ExportTx. Authorized by the
/// account's own signature over the transaction, keyed by "nonce" rather
/// than by a spent UTXO.
/// ref. <https://pkg.go.dev/github.com/ava-labs/coreth/plugin/evm#EVMInput>
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq, Clone)]
pub struct Input {
    #[serde(with = "crate::codec::serde::hex_0x_primitive_types_h160")]
    pub address: H160,
    pub amount: u64,
    #[serde(rename = "assetID")]
    pub asset_id: ids::Id,
    pub nonce: u64,
}

impl Default for Input {
    fn default() -> Self {
        Self {
            address: H160::zero(),
            amount: 0,
            asset_id: ids::Id::empty(),
            nonce: 0,
        }
    }
}

impl Input {
    pub fn new(address: H160, amount: u64, asset_id: ids::Id, nonce: u64) -> Self {
        Self {
            address,
            amount,
            asset_id,
            nonce,
        }
    }

    pub fn unpack(packer: &Packer) -> Result<Self> {
        let address_bytes = packer.unpack_bytes(20)?;
        let amount = packer.unpack_u64()?;
        let asset_id_bytes = packer.unpack_bytes(ids::LEN)?;
        let nonce = packer.unpack_u64()?;
        Ok(Self {
            address: H160::from_slice(&address_bytes),
            amount,
            asset_id: ids::Id::from_slice(&asset_id_bytes),
            nonce,
        })
    }
}

impl Packable for Input {
    fn pack(&self, packer: &Packer) -> Result<()> {
        packer.pack_bytes(self.address.as_bytes())?;
        packer.pack_u64(self.amount)?;
        packer.pack_bytes(self.asset_id.as_ref())?;
        packer.pack_u64(self.nonce)?;
        Ok(())
    }
}

/// ref. <https://pkg.go.dev/github.com/ava-labs/coreth/plugin/evm#EVMInput> sort order
impl Ord for Input {
    fn cmp(&self, other: &Input) -> Ordering {
        self.address
            .cmp(&other.address)
            .then_with(|| self.asset_id.cmp(&other.asset_id))
            .then_with(|| self.nonce.cmp(&other.nonce))
    }
}

impl PartialOrd for Input {
    fn partial_cmp(&self, other: &Input) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// RUST_LOG=debug cargo test --package avalanche-types --lib -- evm::atomic::test_output_pack_unpack --exact --show-output
#[test]
fn test_output_pack_unpack() {
    let output = Output::new(
        H160::from_slice(&[0x01; 20]),
        12345,
        ids::Id::from_slice(&[0x02; 32]),
    );

    let packer = Packer::new(128, 128);
    output.pack(&packer).unwrap();
    let packed = packer.take_bytes();

    let unpacker = Packer::load_bytes_for_unpack(128, &packed);
    let unpacked = Output::unpack(&unpacker).unwrap();
    assert_eq!(output, unpacked);
}

#[test]
fn test_output_spendable() {
    let owner = short::Id::from_slice(&[0xaa; 20]);
    let output = Output::new(H160::from_slice(&[0xaa; 20]), 1, ids::Id::empty());

    assert!(output.meets_threshold(&[owner.clone()], 0));
    assert!(!output.meets_threshold(&[short::Id::from_slice(&[0xbb; 20])], 0));
    assert_eq!(output.spenders(&[owner.clone()]), vec![owner.clone()]);
    assert_eq!(output.address_index(&owner), Some(0));
}

/// RUST_LOG=debug cargo test --package avalanche-types --lib -- evm::atomic::test_sort_outputs --exact --show-output
#[test]
fn test_sort_outputs() {
    let mut outputs = vec![
        Output::new(H160::from_slice(&[0x02; 20]), 1, ids::Id::empty()),
        Output::new(H160::from_slice(&[0x01; 20]), 1, ids::Id::from_slice(&[2; 32])),
        Output::new(H160::from_slice(&[0x01; 20]), 1, ids::Id::from_slice(&[1; 32])),
    ];
    outputs.sort();

    assert_eq!(outputs[0].address, H160::from_slice(&[0x01; 20]));
    assert_eq!(outputs[0].asset_id, ids::Id::from_slice(&[1; 32]));
    assert_eq!(outputs[1].address, H160::from_slice(&[0x01; 20]));
    assert_eq!(outputs[1].asset_id, ids::Id::from_slice(&[2; 32]));
    assert_eq!(outputs[2].address, H160::from_slice(&[0x02; 20]));
}
