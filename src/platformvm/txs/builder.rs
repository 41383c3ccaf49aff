//! High-level P-chain transaction assembly, mirroring [`crate::avm::txs::builder`]
//! but framed for [`export::Tx`]/[`import::Tx`]'s "creds" field and StakeableLock-aware
//! UTXOs.
use crate::{
    errors::{Error, Result},
    ids::{self, short},
    platformvm::txs::{export, import},
    txs::{self, builder::base_tx_demands, solver, utxo_set::UtxoSet},
};

fn into_option<T>(v: Vec<T>) -> Option<Vec<T>> {
    if v.is_empty() {
        None
    } else {
        Some(v)
    }
}

/// Builds an "ExportTx" moving "amount" of "asset_id" to "destination_chain_id".
#[allow(clippy::too_many_arguments)]
pub fn create_export_tx(
    network_id: u32,
    blockchain_id: ids::Id,
    destination_chain_id: ids::Id,
    utxo_set: &UtxoSet,
    asset_id: ids::Id,
    amount: u64,
    fee_asset_id: ids::Id,
    fee: u64,
    senders: Vec<short::Id>,
    destinations: Vec<short::Id>,
    change_addresses: Vec<short::Id>,
    threshold: u32,
    as_of: u64,
) -> Result<Option<export::Tx>> {
    let Some(demands) = base_tx_demands(
        asset_id.clone(),
        amount,
        fee_asset_id,
        fee,
        senders,
        destinations.clone(),
        change_addresses,
        threshold,
    )?
    else {
        return Ok(None);
    };

    let (inputs, outputs) = solver::spend(utxo_set, demands, as_of)?;
    let (destination_chain_outputs, change_outputs): (Vec<_>, Vec<_>) =
        outputs.into_iter().partition(|o| {
            o.asset_id == asset_id
                && matches!(
                    &o.out,
                    txs::transferable::TransferableOut::TransferOutput(t)
                        if t.output_owners.addresses == destinations
                )
        });

    Ok(Some(export::Tx {
        base_tx: txs::Tx {
            network_id,
            blockchain_id,
            transferable_inputs: into_option(inputs),
            transferable_outputs: into_option(change_outputs),
            ..txs::Tx::default()
        },
        destination_chain_id,
        destination_chain_transferable_outputs: into_option(destination_chain_outputs),
        ..Default::default()
    }))
}

/// Builds an "ImportTx" pulling "atomic_utxos" in from "source_chain_id",
/// paying the fee preferentially out of the atomics before falling back to
/// "utxo_set".
#[allow(clippy::too_many_arguments)]
pub fn create_import_tx(
    network_id: u32,
    blockchain_id: ids::Id,
    source_chain_id: ids::Id,
    atomic_utxos: Vec<txs::utxo::Utxo>,
    utxo_set: &UtxoSet,
    fee_asset_id: ids::Id,
    fee: u64,
    senders: Vec<short::Id>,
    destinations: Vec<short::Id>,
    change_addresses: Vec<short::Id>,
    threshold: u32,
    as_of: u64,
) -> Result<import::Tx> {
    if threshold as usize > destinations.len() {
        return Err(Error::Config {
            message: format!(
                "threshold {} exceeds number of destinations {}",
                threshold,
                destinations.len()
            ),
        });
    }

    let mut source_chain_transferable_inputs: Vec<txs::transferable::Input> = Vec::new();
    let mut fee_paid: u64 = 0;
    let mut imported_amount: u64 = 0;

    for utxo in atomic_utxos.iter() {
        if utxo.asset_id != fee_asset_id {
            continue;
        }
        if !utxo.meets_threshold(&senders, as_of) {
            continue;
        }
        let mut sig_indices: Vec<u32> = utxo
            .spenders(&senders)
            .iter()
            .filter_map(|addr| utxo.address_index(addr))
            .collect();
        sig_indices.sort_unstable();
        sig_indices.dedup();
        if sig_indices.is_empty() {
            continue;
        }

        source_chain_transferable_inputs.push(utxo.to_transferable_input(sig_indices));
        let amount = utxo.amount();
        if fee_paid < fee {
            let applied = std::cmp::min(fee - fee_paid, amount);
            fee_paid += applied;
            imported_amount += amount - applied;
        } else {
            imported_amount += amount;
        }
    }

    let mut regular_inputs: Vec<txs::transferable::Input> = Vec::new();
    let mut regular_outputs: Vec<txs::transferable::Output> = Vec::new();
    if fee_paid < fee {
        let mut fee_demand =
            solver::AssetAmountDestination::new(fee_asset_id.clone(), 0, fee - fee_paid);
        fee_demand.senders = senders;
        fee_demand.change_addresses = change_addresses;
        let (ins, outs) = solver::spend(utxo_set, vec![fee_demand], as_of)?;
        regular_inputs = ins;
        regular_outputs = outs;
    }

    let mut transferable_outputs = regular_outputs;
    if imported_amount > 0 {
        transferable_outputs.push(txs::transferable::Output {
            asset_id: fee_asset_id,
            out: txs::transferable::TransferableOut::TransferOutput(
                crate::key::secp256k1::txs::transfer::Output {
                    amount: imported_amount,
                    output_owners: crate::key::secp256k1::txs::OutputOwners {
                        locktime: 0,
                        threshold,
                        addresses: destinations,
                    },
                },
            ),
            ..Default::default()
        });
    }

    Ok(import::Tx {
        base_tx: txs::Tx {
            network_id,
            blockchain_id,
            transferable_inputs: into_option(regular_inputs),
            transferable_outputs: into_option(transferable_outputs),
            ..txs::Tx::default()
        },
        source_chain_id,
        source_chain_transferable_inputs: into_option(source_chain_transferable_inputs),
        creds: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key;

    fn transfer_utxo(
        tx_id_byte: u8,
        asset_id: &ids::Id,
        amount: u64,
        addr: &short::Id,
    ) -> txs::utxo::Utxo {
        txs::utxo::Utxo {
            utxo_id: txs::utxo::Id::new(&[tx_id_byte; 32], 0, false).unwrap(),
            asset_id: asset_id.clone(),
            transfer_output: Some(key::secp256k1::txs::transfer::Output {
                amount,
                output_owners: key::secp256k1::txs::OutputOwners {
                    locktime: 0,
                    threshold: 1,
                    addresses: vec![addr.clone()],
                },
            }),
            ..txs::utxo::Utxo::default()
        }
    }

    #[test]
    fn test_create_import_tx_fee_shortfall_pulls_from_utxo_set() {
        let sender = short::Id::from_slice(&[0x01; 20]);
        let change = short::Id::from_slice(&[0x02; 20]);
        let dest = short::Id::from_slice(&[0x03; 20]);
        let avax = ids::Id::from_slice(&[0x09; 32]);

        let atomic_utxo = transfer_utxo(0x10, &avax, 5, &sender);
        let mut set = UtxoSet::new();
        set.add(transfer_utxo(0x11, &avax, 100, &sender));

        let tx = create_import_tx(
            1,
            ids::Id::from_slice(&[0xaa; 32]),
            ids::Id::from_slice(&[0xcc; 32]),
            vec![atomic_utxo],
            &set,
            avax,
            10,
            vec![sender],
            vec![dest],
            vec![change],
            1,
            0,
        )
        .unwrap();

        // 5 of the 10 fee paid by the atomic, 5 left over taken from the
        // regular set (amount 100), leaving 95 as on-chain change.
        assert_eq!(tx.base_tx.transferable_inputs.unwrap().len(), 1);
        let outs = tx.base_tx.transferable_outputs.unwrap();
        assert_eq!(outs.len(), 1);
        match &outs[0].out {
            txs::transferable::TransferableOut::TransferOutput(t) => assert_eq!(t.amount, 95),
            _ => unreachable!(),
        }
    }
}
