//! C-chain export transaction: debits EVM accounts and sends the value to an
//! X/P-chain destination as an ordinary transferable output.
//! ref. <https://pkg.go.dev/github.com/ava-labs/coreth/plugin/evm#UnsignedExportTx>
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
    #[serde(rename = "destinationChain")]
    pub destination_chain_id: ids::Id,

    pub ins: Vec<atomic::Input>,
    #[serde(rename = "exportedOutputs")]
    pub exported_outputs: Vec<txs::transferable::Output>,
}

impl Tx {
    pub fn tx_id(&self) -> ids::Id {
        self.metadata
            .as_ref()
            .map(|m| m.id.clone())
            .unwrap_or_default()
    }

    pub fn type_name() -> String {
        "evm.UnsignedExportTx".to_string()
    }

    pub fn type_id() -> u32 {
        1
    }

    /// ref. <https://pkg.go.dev/github.com/ava-labs/coreth/plugin/evm#Tx.Sign>
    pub async fn sign<T: key::secp256k1::SignOnly>(&mut self, signers: Vec<Vec<T>>) -> Result<()> {
        let packer = crate::packer::Packer::new(4096, 4096);
        packer.pack_u16(codec::VERSION)?;
        packer.pack_u32(Self::type_id())?;
        packer.pack_u32(self.network_id)?;
        packer.pack_bytes(self.blockchain_id.as_ref())?;
        packer.pack_bytes(self.destination_chain_id.as_ref())?;

        packer.pack_u32(self.ins.len() as u32)?;
        for input in self.ins.iter() {
            packer.pack(input)?;
        }

        packer.pack_u32(self.exported_outputs.len() as u32)?;
        for output in self.exported_outputs.iter() {
            packer.pack_bytes(output.asset_id.as_ref())?;
            match &output.out {
                txs::transferable::TransferableOut::TransferOutput(t) => {
                    packer.pack(t)?;
                }
                txs::transferable::TransferableOut::StakeableLockOut(_) => {
                    return Err(crate::errors::Error::Config {
                        message: "stakeable-locked outputs cannot be exported to the C-chain"
                            .to_string(),
                    });
                }
            }
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
