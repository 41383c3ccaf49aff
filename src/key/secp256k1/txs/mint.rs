use std::cmp::Ordering;

use crate::{codec, key};
use serde::{Deserialize, Serialize};

/// An output that grants its owners the right to mint more of an asset.
/// Carried only in "CreateAssetTx.initialStates"/"OperationTx" minting flows;
/// this crate's spend solver never selects it (it has no transfer amount).
/// ref. <https://pkg.go.dev/github.com/ava-labs/avalanchego/vms/secp256k1fx#MintOutput>
#[derive(Debug, Serialize, Deserialize, Eq, Clone, Default)]
pub struct MintOutput {
    #[serde(flatten)]
    pub output_owners: key::secp256k1::txs::OutputOwners,
}

impl MintOutput {
    pub fn type_name() -> String {
        "secp256k1fx.MintOutput".to_string()
    }

    pub fn type_id() -> u32 {
        *(codec::X_TYPES.get(&Self::type_name()).unwrap()) as u32
    }
}

impl Ord for MintOutput {
    fn cmp(&self, other: &MintOutput) -> Ordering {
        self.output_owners.cmp(&other.output_owners)
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

#[test]
fn test_sort_mint_outputs() {
    use crate::ids::short;

    let mut outputs = vec![
        MintOutput {
            output_owners: key::secp256k1::txs::OutputOwners {
                locktime: 0,
                threshold: 1,
                addresses: vec![short::Id::from_slice(&[2u8; 20])],
            },
        },
        MintOutput {
            output_owners: key::secp256k1::txs::OutputOwners {
                locktime: 0,
                threshold: 1,
                addresses: vec![short::Id::from_slice(&[1u8; 20])],
            },
        },
    ];
    outputs.sort();
    assert_eq!(
        outputs[0].output_owners.addresses,
        vec![short::Id::from_slice(&[1u8; 20])]
    );
}
