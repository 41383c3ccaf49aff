//! High-level X-chain transaction assembly: turns a [`UtxoSet`] plus a spend
//! demand into a ready-to-sign [`avm::txs::Tx`]/[`export::Tx`]/[`import::Tx`],
//! wrapping [`crate::txs::solver::spend`] with the BaseTx/ExportTx/ImportTx
//! wire framing.
//! ref. <https://pkg.go.dev/github.com/ava-labs/avalanchego/vms/platformvm/txs/builder#Builder>
use crate::{
    avm::txs::{export, import, Tx as BaseTx},
    errors::{Error, Result},
    ids::{self, short},
    txs::{self, builder::base_tx_demands, solver, utxo_set::UtxoSet},
};

fn into_option<T>(v: Vec<T>) -> Option<Vec<T>> {
    if v.is_empty() {
        None
    } else {
        Some(v)
    }
}

/// Builds a plain value-transfer "BaseTx". Returns "Ok(None)" when "amount ==
/// 0" (a no-op payment).
#[allow(clippy::too_many_arguments)]
pub fn create_base_tx(
    network_id: u32,
    blockchain_id: ids::Id,
    utxo_set: &UtxoSet,
    asset_id: ids::Id,
    amount: u64,
    fee_asset_id: ids::Id,
    fee: u64,
    senders: Vec<short::Id>,
    destinations: Vec<short::Id>,
    change_addresses: Vec<short::Id>,
    threshold: u32,
    memo: Option<Vec<u8>>,
    as_of: u64,
) -> Result<Option<BaseTx>> {
    let Some(demands) = base_tx_demands(
        asset_id,
        amount,
        fee_asset_id,
        fee,
        senders,
        destinations,
        change_addresses,
        threshold,
    )?
    else {
        return Ok(None);
    };

    let (inputs, outputs) = solver::spend(utxo_set, demands, as_of)?;
    Ok(Some(BaseTx::new(txs::Tx {
        network_id,
        blockchain_id,
        transferable_inputs: into_option(inputs),
        transferable_outputs: into_option(outputs),
        memo,
        ..txs::Tx::default()
    })))
}

/// Builds an "ExportTx" moving "amount" of "asset_id" to "destination_chain_id",
/// spending ordinary UTXOs on this chain. Change stays on the source chain.
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

    // the destination-chain outputs are the payload leg only (never the fee
    // leg or change, which stay on the source chain).
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

/// Builds an "ImportTx" pulling "atomic_utxos" in from "source_chain_id".
/// The fee is paid preferentially out of the imported inputs themselves;
/// only the shortfall (if any) is solved against the main "utxo_set".
/// ref. <https://pkg.go.dev/github.com/ava-labs/avalanchego/vms/platformvm/txs/builder#Builder.NewImportTx>
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

    // the atomics didn't fully cover the fee -- solve the remainder against
    // the main chain UTXO set, as a pure burn (no destination of its own).
    let mut regular_inputs: Vec<txs::transferable::Input> = Vec::new();
    let mut regular_outputs: Vec<txs::transferable::Output> = Vec::new();
    if fee_paid < fee {
        let mut fee_demand = solver::AssetAmountDestination::new(fee_asset_id.clone(), 0, fee - fee_paid);
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
        fx_creds: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{key, txs::utxo};

    fn transfer_utxo(
        tx_id_byte: u8,
        asset_id: &ids::Id,
        amount: u64,
        addr: &short::Id,
    ) -> utxo::Utxo {
        utxo::Utxo {
            utxo_id: utxo::Id::new(&[tx_id_byte; 32], 0, false).unwrap(),
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

    #[test]
    fn test_create_base_tx_no_op_on_zero_amount() {
        let set = UtxoSet::new();
        let tx = create_base_tx(
            1,
            ids::Id::empty(),
            &set,
            ids::Id::from_slice(&[0x01; 32]),
            0,
            ids::Id::from_slice(&[0x01; 32]),
            0,
            vec![],
            vec![],
            vec![],
            1,
            None,
            0,
        )
        .unwrap();
        assert!(tx.is_none());
    }

    #[test]
    fn test_create_export_tx_splits_destination_and_change() {
        let sender = short::Id::from_slice(&[0x01; 20]);
        let dest = short::Id::from_slice(&[0x02; 20]);
        let change = short::Id::from_slice(&[0x03; 20]);
        let avax = ids::Id::from_slice(&[0x09; 32]);

        let mut set = UtxoSet::new();
        set.add(transfer_utxo(0x10, &avax, 1_000, &sender));

        let tx = create_export_tx(
            1,
            ids::Id::from_slice(&[0xaa; 32]),
            ids::Id::from_slice(&[0xbb; 32]),
            &set,
            avax.clone(),
            500,
            avax,
            10,
            vec![sender],
            vec![dest],
            vec![change],
            1,
            0,
        )
        .unwrap()
        .unwrap();

        let dest_outs = tx.destination_chain_transferable_outputs.unwrap();
        assert_eq!(dest_outs.len(), 1);
        let change_outs = tx.base_tx.transferable_outputs.unwrap();
        assert_eq!(change_outs.len(), 1);
    }

    #[test]
    fn test_create_import_tx_fee_from_atomics_no_change() {
        let sender = short::Id::from_slice(&[0x01; 20]);
        let evm_dest = short::Id::from_slice(&[0x02; 20]);
        let avax = ids::Id::from_slice(&[0x09; 32]);

        let atomic_utxo = transfer_utxo(0x20, &avax, 100, &sender);
        let set = UtxoSet::new();

        let tx = create_import_tx(
            1,
            ids::Id::from_slice(&[0xaa; 32]),
            ids::Id::from_slice(&[0xcc; 32]),
            vec![atomic_utxo],
            &set,
            avax,
            10,
            vec![sender],
            vec![evm_dest],
            vec![],
            1,
            0,
        )
        .unwrap();

        assert_eq!(tx.source_chain_transferable_inputs.unwrap().len(), 1);
        let outs = tx.base_tx.transferable_outputs.unwrap();
        assert_eq!(outs.len(), 1);
        match &outs[0].out {
            txs::transferable::TransferableOut::TransferOutput(t) => assert_eq!(t.amount, 90),
            _ => unreachable!(),
        }
        assert!(tx.base_tx.transferable_inputs.is_none());
    }
}
