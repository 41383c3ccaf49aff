use crate::{
    errors::{Error, Result},
    ids::{self, short},
    txs::{transferable, utxo_set::UtxoSet},
    key,
};

/// One asset's demand against a [`spend`] call: pay "amount" to
/// "destinations", additionally burning "burn" (e.g. a network fee), funded
/// by UTXOs owned by "senders". Any unspent remainder goes to
/// "change_addresses".
/// ref. <https://pkg.go.dev/github.com/ava-labs/avalanchego/vms/platformvm/txs/builder#Builder.Spend>
#[derive(Debug, Clone)]
pub struct AssetAmountDestination {
    pub asset_id: ids::Id,
    pub amount: u64,
    pub burn: u64,
    pub senders: Vec<short::Id>,
    pub destinations: Vec<short::Id>,
    pub change_addresses: Vec<short::Id>,
    pub threshold: u32,
    pub locktime: u64,
}

impl AssetAmountDestination {
    pub fn new(asset_id: ids::Id, amount: u64, burn: u64) -> Self {
        Self {
            asset_id,
            amount,
            burn,
            senders: Vec::new(),
            destinations: Vec::new(),
            change_addresses: Vec::new(),
            threshold: 1,
            locktime: 0,
        }
    }

    fn total_demand(&self) -> u64 {
        self.amount.saturating_add(self.burn)
    }
}

struct DemandState {
    demand: AssetAmountDestination,
    spent: u64,
}

/// Greedily consumes "utxo_set" in its stable iteration order to cover every
/// asset demand in "demands", as of "as_of". Deterministic (first-fit in set
/// order) so the same inputs always produce the same transaction, which
/// matters for reproducible test vectors and for multi-party co-signing
/// (every signer must compute the same unsigned transaction bytes).
/// ref. <https://pkg.go.dev/github.com/ava-labs/avalanchego/vms/components/avax#AtomicUTXOManager>
pub fn spend(
    utxo_set: &UtxoSet,
    demands: Vec<AssetAmountDestination>,
    as_of: u64,
) -> Result<(Vec<transferable::Input>, Vec<transferable::Output>)> {
    let mut states: Vec<DemandState> = demands
        .into_iter()
        .map(|demand| DemandState { demand, spent: 0 })
        .collect();

    let mut inputs: Vec<transferable::Input> = Vec::new();

    for utxo in utxo_set.get_all_utxos() {
        let Some(state) = states
            .iter_mut()
            .find(|s| s.demand.asset_id == utxo.asset_id)
        else {
            // asset not demanded by this spend -- not ours to touch
            continue;
        };
        if state.spent >= state.demand.total_demand() {
            log::debug!("asset {} already fully funded, skipping UTXO", utxo.asset_id);
            continue;
        }
        if utxo.amount() == 0 {
            continue;
        }
        if !utxo.meets_threshold(&state.demand.senders, as_of) {
            log::debug!(
                "UTXO for asset {} does not meet spend threshold, skipping",
                utxo.asset_id
            );
            continue;
        }

        let mut sig_indices: Vec<u32> = utxo
            .spenders(&state.demand.senders)
            .iter()
            .filter_map(|addr| utxo.address_index(addr))
            .collect();
        sig_indices.sort_unstable();
        sig_indices.dedup();
        if sig_indices.is_empty() {
            // threshold matched but no sig index resolved -- unsignable, leave it
            continue;
        }

        log::debug!(
            "accepting UTXO {:?} for asset {} (amount {})",
            utxo.utxo_id,
            utxo.asset_id,
            utxo.amount()
        );
        inputs.push(utxo.to_transferable_input(sig_indices));
        state.spent += utxo.amount();
    }

    let mut outputs: Vec<transferable::Output> = Vec::new();
    for state in &states {
        if state.spent < state.demand.total_demand() {
            return Err(Error::InsufficientFunds {
                asset_id: state.demand.asset_id.clone(),
                shortfall: state.demand.total_demand() - state.spent,
            });
        }

        log::debug!(
            "asset {}: consumed {}, demand {} (amount {} + burn {})",
            state.demand.asset_id,
            state.spent,
            state.demand.total_demand(),
            state.demand.amount,
            state.demand.burn
        );

        if state.demand.amount > 0 {
            outputs.push(transferable::Output {
                asset_id: state.demand.asset_id.clone(),
                out: transferable::TransferableOut::TransferOutput(
                    key::secp256k1::txs::transfer::Output {
                        amount: state.demand.amount,
                        output_owners: key::secp256k1::txs::OutputOwners {
                            locktime: state.demand.locktime,
                            threshold: state.demand.threshold,
                            addresses: state.demand.destinations.clone(),
                        },
                    },
                ),
                ..transferable::Output::default()
            });
        }

        let change = state.spent - state.demand.total_demand();
        if change > 0 {
            outputs.push(transferable::Output {
                asset_id: state.demand.asset_id.clone(),
                out: transferable::TransferableOut::TransferOutput(
                    key::secp256k1::txs::transfer::Output {
                        amount: change,
                        output_owners: key::secp256k1::txs::OutputOwners {
                            locktime: 0,
                            threshold: 1,
                            addresses: state.demand.change_addresses.clone(),
                        },
                    },
                ),
                ..transferable::Output::default()
            });
        }
    }

    Ok((inputs, outputs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{key, txs::utxo};

    fn transfer_utxo(
        tx_id_byte: u8,
        output_index: u32,
        asset_id: &ids::Id,
        amount: u64,
        addr: &short::Id,
    ) -> utxo::Utxo {
        utxo::Utxo {
            utxo_id: utxo::Id::new(&[tx_id_byte; 32], output_index, false).unwrap(),
            asset_id: asset_id.clone(),
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

    /// RUST_LOG=debug cargo test --package avalanche-types --lib -- txs::solver::tests::test_spend_exact_with_change --exact --show-output
    #[test]
    fn test_spend_exact_with_change() {
        let sender = short::Id::from_slice(&[0x01; 20]);
        let dest = short::Id::from_slice(&[0x02; 20]);
        let change_addr = short::Id::from_slice(&[0x03; 20]);
        let avax = ids::Id::from_slice(&[0x09; 32]);

        let mut set = UtxoSet::new();
        set.add(transfer_utxo(0x10, 0, &avax, 700, &sender));

        let mut demand = AssetAmountDestination::new(avax.clone(), 500, 10);
        demand.senders = vec![sender.clone()];
        demand.destinations = vec![dest.clone()];
        demand.change_addresses = vec![change_addr.clone()];

        let (inputs, outputs) = spend(&set, vec![demand], 0).unwrap();
        assert_eq!(inputs.len(), 1);
        assert_eq!(outputs.len(), 2);

        let dest_out = outputs
            .iter()
            .find(|o| match &o.out {
                transferable::TransferableOut::TransferOutput(t) => {
                    t.output_owners.addresses == vec![dest.clone()]
                }
                _ => false,
            })
            .unwrap();
        match &dest_out.out {
            transferable::TransferableOut::TransferOutput(t) => assert_eq!(t.amount, 500),
            _ => unreachable!(),
        }

        let change_out = outputs
            .iter()
            .find(|o| match &o.out {
                transferable::TransferableOut::TransferOutput(t) => {
                    t.output_owners.addresses == vec![change_addr.clone()]
                }
                _ => false,
            })
            .unwrap();
        match &change_out.out {
            transferable::TransferableOut::TransferOutput(t) => assert_eq!(t.amount, 190),
            _ => unreachable!(),
        }
    }

    /// RUST_LOG=debug cargo test --package avalanche-types --lib -- txs::solver::tests::test_spend_insufficient_funds --exact --show-output
    #[test]
    fn test_spend_insufficient_funds() {
        let sender = short::Id::from_slice(&[0x01; 20]);
        let dest = short::Id::from_slice(&[0x02; 20]);
        let avax = ids::Id::from_slice(&[0x09; 32]);

        let mut set = UtxoSet::new();
        set.add(transfer_utxo(0x10, 0, &avax, 100, &sender));

        let mut demand = AssetAmountDestination::new(avax.clone(), 500, 10);
        demand.senders = vec![sender];
        demand.destinations = vec![dest];

        let err = spend(&set, vec![demand], 0).unwrap_err();
        match err {
            Error::InsufficientFunds {
                asset_id,
                shortfall,
            } => {
                assert_eq!(asset_id, avax);
                assert_eq!(shortfall, 410);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    /// RUST_LOG=debug cargo test --package avalanche-types --lib -- txs::solver::tests::test_spend_ignores_undemanded_asset --exact --show-output
    #[test]
    fn test_spend_ignores_undemanded_asset() {
        let sender = short::Id::from_slice(&[0x01; 20]);
        let dest = short::Id::from_slice(&[0x02; 20]);
        let avax = ids::Id::from_slice(&[0x09; 32]);
        let other_asset = ids::Id::from_slice(&[0x0a; 32]);

        let mut set = UtxoSet::new();
        set.add(transfer_utxo(0x10, 0, &other_asset, 1_000, &sender));
        set.add(transfer_utxo(0x11, 0, &avax, 500, &sender));

        let mut demand = AssetAmountDestination::new(avax.clone(), 500, 0);
        demand.senders = vec![sender];
        demand.destinations = vec![dest];

        let (inputs, outputs) = spend(&set, vec![demand], 0).unwrap();
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0].asset_id, avax);
        assert_eq!(outputs.len(), 1);
    }
}
