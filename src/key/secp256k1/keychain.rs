use std::collections::HashMap;

use crate::{
    errors::{Error, Result},
    ids::short,
    key,
    txs::{transferable, utxo_set::UtxoSet},
};
use serde::{Deserialize, Serialize};

/// Support multiple keys as a chain.
/// ref. <https://pkg.go.dev/github.com/ava-labs/avalanchego/vms/secp256k1fx#Keychain>
/// ref. <https://github.com/ava-labs/avalanchego/blob/v1.7.9/wallet/chain/p/builder.go>
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq, Clone)]
pub struct Keychain<T: key::secp256k1::ReadOnly + key::secp256k1::SignOnly> {
    pub keys: Vec<T>,
    pub short_addr_to_key_index: HashMap<short::Id, u32>,
}

impl<T> Keychain<T>
where
    T: key::secp256k1::ReadOnly + key::secp256k1::SignOnly + Clone,
{
    pub fn new(keys: Vec<T>) -> Self {
        let mut short_addr_to_key_index = HashMap::new();
        for (pos, k) in keys.iter().enumerate() {
            short_addr_to_key_index.insert(k.short_address().unwrap(), pos as u32);
        }
        Self {
            keys,
            short_addr_to_key_index,
        }
    }

    /// ref. <https://pkg.go.dev/github.com/ava-labs/avalanchego/vms/secp256k1fx#Keychain.Get>
    pub fn get(&self, short_addr: &short::Id) -> Option<T> {
        self.short_addr_to_key_index
            .get(short_addr)
            .map(|k| self.keys[(*k) as usize].clone())
    }

    /// ref. <https://pkg.go.dev/github.com/ava-labs/avalanchego/vms/secp256k1fx#Keychain.Match>
    pub fn match_threshold(
        &self,
        output_owners: &key::secp256k1::txs::OutputOwners,
        time: u64,
    ) -> Option<(Vec<u32>, Vec<T>)> {
        if output_owners.locktime > time {
            // output owners are still locked
            return None;
        }

        let mut sig_indices: Vec<u32> = Vec::new();
        let mut keys: Vec<T> = Vec::new();
        for (pos, addr) in output_owners.addresses.iter().enumerate() {
            let key = self.get(addr);
            if key.is_none() {
                continue;
            }
            sig_indices.push(pos as u32);
            keys.push(key.unwrap());

            if (keys.len() as u32) == output_owners.threshold {
                break;
            }
        }

        let n = keys.len();
        if (n as u32) == output_owners.threshold {
            Some((sig_indices, keys))
        } else {
            None
        }
    }

    /// Returns "None" if the threshold is NOT met.
    /// ref. <https://pkg.go.dev/github.com/ava-labs/avalanchego/vms/secp256k1fx#Keychain.Spend>
    /// TODO: support spend on "secp256k1fx::MintOutput"
    pub fn spend(
        &self,
        output: &key::secp256k1::txs::transfer::Output,
        time: u64,
    ) -> Option<(key::secp256k1::txs::transfer::Input, Vec<T>)> {
        let res = self.match_threshold(&output.output_owners, time);
        let threshold_met = res.is_some();
        if !threshold_met {
            return None;
        }

        let (sig_indices, keys) = res.unwrap();
        Some((
            key::secp256k1::txs::transfer::Input {
                amount: output.amount,
                sig_indices,
            },
            keys,
        ))
    }

    /// Resolves the per-input signer sets for an already-built unsigned
    /// transaction's "inputs" against "utxo_set", in the order "Tx::sign"
    /// expects ("signers[i]" authorizes "inputs[i]"). For each input, looks
    /// up the spent UTXO, reads its output's address at every sig index, and
    /// fetches the matching key from this keychain.
    ///
    /// Fails with "Error::MissingKey" if the referenced UTXO is gone or any
    /// of its signing addresses has no corresponding key here -- the caller
    /// cannot produce a valid signature in that case.
    pub fn sign_tx(
        &self,
        inputs: &[transferable::Input],
        utxo_set: &UtxoSet,
    ) -> Result<Vec<Vec<T>>> {
        let mut signers: Vec<Vec<T>> = Vec::with_capacity(inputs.len());
        for input in inputs {
            let utxo = utxo_set.get(&input.utxo_id).ok_or_else(|| Error::MissingKey {
                address: format!("no UTXO for input {:?}", input.utxo_id),
            })?;
            let addresses = utxo.addresses();

            let sig_indices = input
                .transfer_input
                .as_ref()
                .map(|ti| ti.sig_indices.clone())
                .unwrap_or_default();

            let mut keys: Vec<T> = Vec::with_capacity(sig_indices.len());
            for idx in sig_indices {
                let addr = addresses.get(idx as usize).ok_or_else(|| Error::MissingKey {
                    address: format!("sig index {idx} out of range for input {:?}", input.utxo_id),
                })?;
                let key = self.get(addr).ok_or_else(|| Error::MissingKey {
                    address: addr.to_string(),
                })?;
                keys.push(key);
            }
            signers.push(keys);
        }
        Ok(signers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ids, key::secp256k1::ReadOnly, txs::utxo};

    fn transfer_utxo(tx_id_byte: u8, asset_id: ids::Id, amount: u64, addr: &short::Id) -> utxo::Utxo {
        utxo::Utxo {
            utxo_id: utxo::Id::new(&[tx_id_byte; 32], 0, false).unwrap(),
            asset_id,
            transfer_output: Some(key::secp256k1::txs::transfer::Output {
                amount,
                output_owners: key::secp256k1::txs::OutputOwners {
                    locktime: 0,
                    threshold: 1,
                    addresses: vec![addr.clone()],
                },
            }),
            ..utxo::Utxo::default()
        }
    }

    /// RUST_LOG=debug cargo test --package avalanche-types --lib -- key::secp256k1::keychain::test_sign_tx_resolves_signer --exact --show-output
    #[test]
    fn test_sign_tx_resolves_signer() {
        let k = key::secp256k1::private_key::Key::generate().unwrap();
        let addr = k.short_address().unwrap();
        let keychain = Keychain::new(vec![k]);

        let avax = ids::Id::from_slice(&[0x09; 32]);
        let mut set = UtxoSet::new();
        set.add(transfer_utxo(0x10, avax.clone(), 1_000, &addr));

        let utxo = set
            .get(&utxo::Id::new(&[0x10; 32], 0, false).unwrap())
            .unwrap();
        let input = utxo.to_transferable_input(vec![0]);

        let signers = keychain.sign_tx(&[input], &set).unwrap();
        assert_eq!(signers.len(), 1);
        assert_eq!(signers[0].len(), 1);
        assert_eq!(signers[0][0].short_address().unwrap(), addr);
    }

    #[test]
    fn test_sign_tx_missing_key() {
        let signer_key = key::secp256k1::private_key::Key::generate().unwrap();
        let other_key = key::secp256k1::private_key::Key::generate().unwrap();
        let addr = other_key.short_address().unwrap();

        // keychain only knows "signer_key", not the address that actually owns the UTXO
        let keychain = Keychain::new(vec![signer_key]);

        let avax = ids::Id::from_slice(&[0x09; 32]);
        let mut set = UtxoSet::new();
        set.add(transfer_utxo(0x20, avax, 1_000, &addr));

        let utxo = set
            .get(&utxo::Id::new(&[0x20; 32], 0, false).unwrap())
            .unwrap();
        let input = utxo.to_transferable_input(vec![0]);

        let err = keychain.sign_tx(&[input], &set).unwrap_err();
        assert!(matches!(err, Error::MissingKey { .. }));
    }
}
