//! Operation transaction type: spends specific UTXOs by id via an fx
//! operation rather than the ordinary BaseTx input/output flow. Included for
//! X-chain dialect completeness; the spend solver never drives this path.
use std::cmp::Ordering;

use crate::{
    avm::txs::fx,
    codec,
    errors::Result,
    hash, ids, key,
    key::secp256k1::txs::transfer,
    txs::{self, utxo},
};
use serde::{Deserialize, Serialize};

/// Mirrors "secp256k1fx.MintOperation"'s input/output field layout, the only
/// secp256k1fx operation this crate's codec registry carries.
/// ref. <https://pkg.go.dev/github.com/ava-labs/avalanchego/vms/secp256k1fx#MintOperation>
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq, Clone, Default)]
pub struct TransferOperation {
    pub inputs: Vec<transfer::Input>,
    pub outputs: Vec<transfer::Output>,
}

/// ref. <https://pkg.go.dev/github.com/ava-labs/avalanchego/vms/avm#Operation>
#[derive(Debug, Serialize, Deserialize, Eq, Clone)]
pub struct Operation {
    #[serde(rename = "assetID")]
    pub asset_id: ids::Id,
    #[serde(rename = "inputIDs")]
    pub utxo_ids: Vec<utxo::Id>,
    #[serde(rename = "fxInput")]
    pub transfer_op: TransferOperation,
}

impl PartialEq for Operation {
    fn eq(&self, other: &Operation) -> bool {
        self.asset_id == other.asset_id
            && self.utxo_ids == other.utxo_ids
            && self.transfer_op == other.transfer_op
    }
}

/// ref. <https://pkg.go.dev/github.com/ava-labs/avalanchego/vms/components/avax#SortOperationsAndCredentials>
impl Ord for Operation {
    fn cmp(&self, other: &Operation) -> Ordering {
        self.asset_id.cmp(&other.asset_id)
    }
}

impl PartialOrd for Operation {
    fn partial_cmp(&self, other: &Operation) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// ref. <https://pkg.go.dev/github.com/ava-labs/avalanchego/vms/avm#OperationTx>
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq, Clone, Default)]
pub struct Tx {
    pub base_tx: txs::Tx,
    pub ops: Vec<Operation>,
    pub fx_creds: Vec<fx::Credential>,
}

impl Tx {
    pub fn new(base_tx: txs::Tx, ops: Vec<Operation>) -> Self {
        let mut ops = ops;
        ops.sort();
        Self {
            base_tx,
            ops,
            ..Self::default()
        }
    }

    pub fn type_name() -> String {
        "avm.OperationTx".to_string()
    }

    pub fn type_id() -> u32 {
        *(codec::X_TYPES.get(&Self::type_name()).unwrap()) as u32
    }

    pub fn tx_id(&self) -> ids::Id {
        if let Some(m) = &self.base_tx.metadata {
            m.id.clone()
        } else {
            ids::Id::default()
        }
    }

    /// ref. <https://pkg.go.dev/github.com/ava-labs/avalanchego/vms/avm#Tx.SignSECP256K1Fx>
    pub async fn sign<T: key::secp256k1::SignOnly>(&mut self, signers: Vec<Vec<T>>) -> Result<()> {
        let type_id = Self::type_id();
        let packer = self.base_tx.pack(codec::VERSION, type_id)?;
        let b = packer.take_bytes();
        packer.set_bytes(&b);

        packer.pack_u32(self.ops.len() as u32)?;
        for op in self.ops.iter() {
            packer.pack_bytes(op.asset_id.as_ref())?;
            packer.pack_u32(op.utxo_ids.len() as u32)?;
            for utxo_id in op.utxo_ids.iter() {
                packer.pack_bytes(utxo_id.tx_id.as_ref())?;
                packer.pack_u32(utxo_id.output_index)?;
            }

            // secp256k1fx.MintOperation is the only Operation variant this
            // crate's registry carries -- reused here for the fx-typed field.
            packer.pack_u32(*(codec::X_TYPES.get("secp256k1fx.MintOperation").unwrap()) as u32)?;
            packer.pack_u32(op.transfer_op.inputs.len() as u32)?;
            for input in op.transfer_op.inputs.iter() {
                packer.pack_u64(input.amount)?;
                packer.pack_u32(input.sig_indices.len() as u32)?;
                for idx in input.sig_indices.iter() {
                    packer.pack_u32(*idx)?;
                }
            }
            packer.pack_u32(op.transfer_op.outputs.len() as u32)?;
            for output in op.transfer_op.outputs.iter() {
                packer.pack(output)?;
            }
        }

        let tx_bytes_with_no_signature = packer.take_bytes();
        packer.set_bytes(&tx_bytes_with_no_signature);
        let tx_bytes_hash = hash::sha256(&tx_bytes_with_no_signature);

        let fx_creds_len = signers.len() as u32;
        packer.pack_u32(fx_creds_len)?;

        self.fx_creds = Vec::new();
        for keys in signers.iter() {
            let mut sigs: Vec<Vec<u8>> = Vec::new();
            for k in keys.iter() {
                let sig = k.sign_digest(&tx_bytes_hash).await?;
                sigs.push(Vec::from(sig));
            }
            let cred = key::secp256k1::txs::Credential { signatures: sigs };
            self.fx_creds.push(fx::Credential {
                cred,
                ..Default::default()
            });
        }
        if fx_creds_len > 0 {
            let cred_type_id = key::secp256k1::txs::Credential::type_id();
            for fx_cred in self.fx_creds.iter() {
                packer.pack_u32(cred_type_id)?;
                packer.pack_u32(fx_cred.cred.signatures.len() as u32)?;
                for sig in fx_cred.cred.signatures.iter() {
                    packer.pack_bytes(sig)?;
                }
            }
        }
        let tx_bytes_with_signatures = packer.take_bytes();
        let tx_id = hash::sha256(&tx_bytes_with_signatures);

        self.base_tx.metadata = Some(txs::Metadata {
            id: ids::Id::from_slice(&tx_id),
            tx_bytes_with_no_signature: tx_bytes_with_no_signature.to_vec(),
            tx_bytes_with_signatures: tx_bytes_with_signatures.to_vec(),
        });

        Ok(())
    }
}

#[test]
fn test_operation_tx_sort() {
    let op_a = Operation {
        asset_id: ids::Id::from_slice(&[0x02; 32]),
        utxo_ids: vec![],
        transfer_op: TransferOperation::default(),
    };
    let op_b = Operation {
        asset_id: ids::Id::from_slice(&[0x01; 32]),
        utxo_ids: vec![],
        transfer_op: TransferOperation::default(),
    };
    let tx = Tx::new(txs::Tx::default(), vec![op_a, op_b]);
    assert_eq!(tx.ops[0].asset_id, ids::Id::from_slice(&[0x01; 32]));
}
