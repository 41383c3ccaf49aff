use std::cmp::Ordering;

use crate::{codec, key};
use serde::{Deserialize, Serialize};

/// ref. <https://pkg.go.dev/github.com/ava-labs/avalanchego/vms/nftfx#MintOutput>
#[derive(Debug, Serialize, Deserialize, Eq, Clone, Default)]
pub struct MintOutput {
    #[serde(rename = "groupID")]
    pub group_id: u32,
    #[serde(flatten)]
    pub output_owners: key::secp256k1::txs::OutputOwners,
}

impl MintOutput {
    pub fn type_name() -> String {
        "nftfx.MintOutput".to_string()
    }

    pub fn type_id() -> u32 {
        *(codec::X_TYPES.get(&Self::type_name()).unwrap()) as u32
    }
}

impl Ord for MintOutput {
    fn cmp(&self, other: &MintOutput) -> Ordering {
        self.group_id
            .cmp(&other.group_id)
            .then_with(|| self.output_owners.cmp(&other.output_owners))
    }
}

impl PartialOrd for MintOutput {
    fn partial_cmp(&self, other: &MintOutput) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for MintOutput {
    fn eq(&self, other: &MintOutput) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

/// ref. <https://pkg.go.dev/github.com/ava-labs/avalanchego/vms/nftfx#TransferOutput>
#[derive(Debug, Serialize, Deserialize, Eq, Clone, Default)]
pub struct TransferOutput {
    #[serde(rename = "groupID")]
    pub group_id: u32,
    pub payload: Vec<u8>,
    #[serde(flatten)]
    pub output_owners: key::secp256k1::txs::OutputOwners,
}

impl TransferOutput {
    pub fn type_name() -> String {
        "nftfx.TransferOutput".to_string()
    }

    pub fn type_id() -> u32 {
        *(codec::X_TYPES.get(&Self::type_name()).unwrap()) as u32
    }
}

impl Ord for TransferOutput {
    fn cmp(&self, other: &TransferOutput) -> Ordering {
        self.group_id
            .cmp(&other.group_id)
            .then_with(|| self.payload.cmp(&other.payload))
            .then_with(|| self.output_owners.cmp(&other.output_owners))
    }
}

impl PartialOrd for TransferOutput {
    fn partial_cmp(&self, other: &TransferOutput) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for TransferOutput {
    fn eq(&self, other: &TransferOutput) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

#[test]
fn test_sort_mint_outputs() {
    let mut outputs = vec![
        MintOutput {
            group_id: 2,
            ..MintOutput::default()
        },
        MintOutput {
            group_id: 1,
            ..MintOutput::default()
        },
    ];
    outputs.sort();
    assert_eq!(outputs[0].group_id, 1);
}
