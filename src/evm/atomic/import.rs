//! C-chain import transaction: pulls value in from an X/P-chain atomic UTXO
//! list and credits it to EVM accounts.
//! ref. <https://pkg.go.dev/github.com/ava-labs/coreth/plugin/evm#UnsignedImportTx>
use crate::{
    codec,
    errors::Result,
    evm::atomic,
    hash, ids, key,
    txs::{self, Metadata},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Eq, PartialEq, Clone, Default)]
pub struct Tx {
    #[serde(skip)]
    pub metadata: Option<Metadata>,

    #[serde(rename = "networkID")]
    pub network_id: u32,
    #[serde(rename = "blockchainID")]
    pub blockchain_id: ids::Id,
    #[serde(rename = "sourceChain")]
    pub source_chain_id: ids::Id,

    #[serde(rename = "importedInputs")]
    pub imported_inputs: Vec<txs::transferable::Input>,
    pub outs: Vec<atomic::Output>,
}

impl Tx {
    pub fn tx_id(&self) -> ids::Id {
        self.metadata
            .as_ref()
            .map(|m| m.id.clone())
            .unwrap_or_default()
    }

    pub fn type_name() -> String {
        "evm.UnsignedImportTx".to_string()
    }

    /// Not carried in the X/P-chain codec registries (this dialect has its
    /// own linear codec on the coreth side); fixed at 0 as its only member.
    /// ref. <https://pkg.go.dev/github.com/ava-labs/coreth/plugin/evm#pkg-constants>
    pub fn type_id() -> u32 {
        0
    }

    /// ref. <https://pkg.go.dev/github.com/ava-labs/coreth/plugin/evm#Tx.Sign>
    pub async fn sign<T: key::secp256k1::SignOnly>(&mut self, signers: Vec<Vec<T>>) -> Result<()> {
        let packer = crate::packer::Packer::new(4096, 4096);
        packer.pack_u16(codec::VERSION)?;
        packer.pack_u32(Self::type_id())?;
        packer.pack_u32(self.network_id)?;
        packer.pack_bytes(self.blockchain_id.as_ref())?;
        packer.pack_bytes(self.source_chain_id.as_ref())?;

        packer.pack_u32(self.imported_inputs.len() as u32)?;
        for input in self.imported_inputs.iter() {
            packer.pack_bytes(input.utxo_id.tx_id.as_ref())?;
            packer.pack_u32(input.utxo_id.output_index)?;
            packer.pack_bytes(input.asset_id.as_ref())?;
            if let Some(transfer_input) = &input.transfer_input {
                packer.pack_u64(transfer_input.amount)?;
                packer.pack_u32(transfer_input.sig_indices.len() as u32)?;
                for idx in transfer_input.sig_indices.iter() {
                    packer.pack_u32(*idx)?;
                }
            }
        }

        packer.pack_u32(self.outs.len() as u32)?;
        for out in self.outs.iter() {
            packer.pack(out)?;
        }

        let tx_bytes_with_no_signature = packer.take_bytes();
        packer.set_bytes(&tx_bytes_with_no_signature);
        let tx_bytes_hash = hash::sha256(&tx_bytes_with_no_signature);

        packer.pack_u32(signers.len() as u32)?;
        for keys in signers.iter() {
            packer.pack_u32(keys.len() as u32)?;
            for k in keys.iter() {
                let sig = k.sign_digest(&tx_bytes_hash).await?;
                packer.pack_bytes(&sig)?;
            }
        }
        let tx_bytes_with_signatures = packer.take_bytes();
        let tx_id = hash::sha256(&tx_bytes_with_signatures);

        self.metadata = Some(Metadata {
            id: ids::Id::from_slice(&tx_id),
            tx_bytes_with_no_signature: tx_bytes_with_no_signature.to_vec(),
            tx_bytes_with_signatures: tx_bytes_with_signatures.to_vec(),
        });

        Ok(())
    }
}
