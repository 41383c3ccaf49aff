//! Asset-creation transaction type.
use std::cmp::Ordering;

use crate::{
    avm::txs::fx,
    codec,
    errors::{Error, Result},
    hash, ids, key,
    key::secp256k1::txs::mint,
    txs::{self, solver, utxo_set::UtxoSet},
};
use serde::{Deserialize, Serialize};

/// One fx's initial mint authority over the new asset, keyed by "fx_id".
/// "outs" must stay sorted for the transaction to be canonical.
/// ref. <https://pkg.go.dev/github.com/ava-labs/avalanchego/vms/avm#InitialState>
#[derive(Debug, Serialize, Deserialize, Eq, Clone, Default)]
pub struct InitialState {
    pub fx_id: u32,
    pub outs: Vec<FxOutput>,
}

impl Ord for InitialState {
    fn cmp(&self, other: &InitialState) -> Ordering {
        self.fx_id.cmp(&other.fx_id)
    }
}

impl PartialOrd for InitialState {
    fn partial_cmp(&self, other: &InitialState) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for InitialState {
    fn eq(&self, other: &InitialState) -> bool {
        self.fx_id == other.fx_id && self.outs == other.outs
    }
}

/// The subset of "secp256k1fx"/"nftfx" outputs legal in an "InitialState":
/// mint authorities only, never a transfer-amount output.
/// ref. <https://pkg.go.dev/github.com/ava-labs/avalanchego/vms/avm#InitialState.Verify>
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(untagged)]
pub enum FxOutput {
    SECPMintOutput(mint::MintOutput),
    NFTMintOutput(fx::nft::MintOutput),
}

impl FxOutput {
    pub fn type_id(&self) -> u32 {
        match self {
            FxOutput::SECPMintOutput(_) => mint::MintOutput::type_id(),
            FxOutput::NFTMintOutput(_) => fx::nft::MintOutput::type_id(),
        }
    }
}

impl Ord for FxOutput {
    fn cmp(&self, other: &FxOutput) -> Ordering {
        let type_id_ord = self.type_id().cmp(&other.type_id());
        if type_id_ord != Ordering::Equal {
            return type_id_ord;
        }
        match (self, other) {
            (FxOutput::SECPMintOutput(a), FxOutput::SECPMintOutput(b)) => a.cmp(b),
            (FxOutput::NFTMintOutput(a), FxOutput::NFTMintOutput(b)) => a.cmp(b),
            (_, _) => Ordering::Equal,
        }
    }
}

impl PartialOrd for FxOutput {
    fn partial_cmp(&self, other: &FxOutput) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// ref. <https://pkg.go.dev/github.com/ava-labs/avalanchego/vms/avm#CreateAssetTx>
/// ref. <https://pkg.go.dev/github.com/ava-labs/avalanchego/vms/avm#Tx>
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq, Clone, Default)]
pub struct Tx {
    pub base_tx: txs::Tx,
    pub name: String,
    pub symbol: String,
    pub denomination: u8,
    pub initial_states: Vec<InitialState>,
    pub fx_creds: Vec<fx::Credential>,
}

impl Tx {
    pub fn new(base_tx: txs::Tx, name: String, symbol: String, denomination: u8) -> Self {
        Self {
            base_tx,
            name,
            symbol,
            denomination,
            ..Self::default()
        }
    }

    pub fn type_name() -> String {
        "avm.CreateAssetTx".to_string()
    }

    pub fn type_id() -> u32 {
        *(codec::X_TYPES.get(&Self::type_name()).unwrap()) as u32
    }

    /// Returns the transaction ID, which becomes the new asset's AssetID
    /// once the embedded metadata is set by signing.
    pub fn tx_id(&self) -> ids::Id {
        if let Some(m) = &self.base_tx.metadata {
            m.id.clone()
        } else {
            ids::Id::default()
        }
    }

    /// Verifies the length limits avalanchego enforces on asset metadata.
    /// ref. <https://pkg.go.dev/github.com/ava-labs/avalanchego/vms/avm#CreateAssetTx.SyntacticVerify>
    pub fn verify(&self) -> Result<()> {
        if self.name.len() > 128 {
            return Err(Error::Config {
                message: format!("asset name too long ({} > 128)", self.name.len()),
            });
        }
        if self.symbol.len() > 4 {
            return Err(Error::Config {
                message: format!("asset symbol too long ({} > 4)", self.symbol.len()),
            });
        }
        if self.denomination > 32 {
            return Err(Error::Config {
                message: format!("denomination too large ({} > 32)", self.denomination),
            });
        }
        Ok(())
    }

    /// ref. <https://pkg.go.dev/github.com/ava-labs/avalanchego/vms/avm#Tx.SignSECP256K1Fx>
    pub async fn sign<T: key::secp256k1::SignOnly>(&mut self, signers: Vec<Vec<T>>) -> Result<()> {
        self.verify()?;

        let type_id = Self::type_id();
        let packer = self.base_tx.pack(codec::VERSION, type_id)?;
        let b = packer.take_bytes();
        packer.set_bytes(&b);

        packer.pack_bytes(self.name.as_bytes())?;
        packer.pack_bytes(self.symbol.as_bytes())?;
        packer.pack_byte(self.denomination)?;

        packer.pack_u32(self.initial_states.len() as u32)?;
        for state in self.initial_states.iter() {
            packer.pack_u32(state.fx_id)?;
            packer.pack_u32(state.outs.len() as u32)?;
            for out in state.outs.iter() {
                packer.pack_u32(out.type_id())?;
                match out {
                    FxOutput::SECPMintOutput(o) => {
                        packer.pack_u64(o.output_owners.locktime)?;
                        packer.pack_u32(o.output_owners.threshold)?;
                        packer.pack_u32(o.output_owners.addresses.len() as u32)?;
                        for addr in o.output_owners.addresses.iter() {
                            packer.pack_bytes(addr.as_ref())?;
                        }
                    }
                    FxOutput::NFTMintOutput(o) => {
                        packer.pack_u32(o.group_id)?;
                        packer.pack_u64(o.output_owners.locktime)?;
                        packer.pack_u32(o.output_owners.threshold)?;
                        packer.pack_u32(o.output_owners.addresses.len() as u32)?;
                        for addr in o.output_owners.addresses.iter() {
                            packer.pack_bytes(addr.as_ref())?;
                        }
                    }
                }
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

/// Assembles a "CreateAssetTx" funding only the network fee out of
/// "utxo_set" (the asset itself doesn't exist yet, so there's nothing to
/// transfer alongside its own creation).
#[allow(clippy::too_many_arguments)]
pub fn create_tx(
    network_id: u32,
    blockchain_id: ids::Id,
    utxo_set: &UtxoSet,
    fee_asset_id: ids::Id,
    fee: u64,
    senders: Vec<crate::ids::short::Id>,
    change_addresses: Vec<crate::ids::short::Id>,
    name: String,
    symbol: String,
    denomination: u8,
    initial_states: Vec<InitialState>,
    as_of: u64,
) -> Result<Tx> {
    let mut demand = solver::AssetAmountDestination::new(fee_asset_id, 0, fee);
    demand.senders = senders;
    demand.change_addresses = change_addresses;

    let (inputs, outputs) = solver::spend(utxo_set, vec![demand], as_of)?;

    let mut initial_states = initial_states;
    initial_states.sort();

    Ok(Tx {
        base_tx: txs::Tx {
            network_id,
            blockchain_id,
            transferable_inputs: if inputs.is_empty() { None } else { Some(inputs) },
            transferable_outputs: if outputs.is_empty() {
                None
            } else {
                Some(outputs)
            },
            ..txs::Tx::default()
        },
        name,
        symbol,
        denomination,
        initial_states,
        ..Tx::default()
    })
}
