//! High-level C-chain atomic transaction assembly: the same Export/Import
//! shape as [`crate::avm::txs::builder`]/[`crate::platformvm::txs::builder`],
//! but funded by EVM account balances on one side and atomic UTXOs on the
//! other, per the coreth atomic-tx dialect.
use primitive_types::H160;

use crate::{
    errors::{Error, Result},
    evm::atomic::{export, import, Input, Output},
    ids::{self, short},
    txs,
};

/// Builds a C-chain "ImportTx": pulls "atomic_utxos" in from "source_chain_id",
/// paying the fee out of the atomics themselves (there is no EVM-side UTXO
/// set to fall back on) and crediting the remainder to "to_address" as a
/// single EVMOutput. No change output exists in the EVM account model.
#[allow(clippy::too_many_arguments)]
pub fn create_import_tx(
    network_id: u32,
    blockchain_id: ids::Id,
    source_chain_id: ids::Id,
    atomic_utxos: Vec<txs::utxo::Utxo>,
    fee_asset_id: ids::Id,
    fee: u64,
    senders: Vec<short::Id>,
    to_address: H160,
    as_of: u64,
) -> Result<import::Tx> {
    let mut imported_inputs: Vec<txs::transferable::Input> = Vec::new();
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

        imported_inputs.push(utxo.to_transferable_input(sig_indices));
        let amount = utxo.amount();
        if fee_paid < fee {
            let applied = std::cmp::min(fee - fee_paid, amount);
            fee_paid += applied;
            imported_amount += amount - applied;
        } else {
            imported_amount += amount;
        }
    }

    if fee_paid < fee {
        return Err(Error::InsufficientFunds {
            asset_id: fee_asset_id,
            shortfall: fee - fee_paid,
        });
    }

    let mut outs = Vec::new();
    if imported_amount > 0 {
        outs.push(Output::new(to_address, imported_amount, fee_asset_id.clone()));
    }

    Ok(import::Tx {
        metadata: None,
        network_id,
        blockchain_id,
        source_chain_id,
        imported_inputs,
        outs,
    })
}

/// Builds a C-chain "ExportTx": debits "from_address" (at "nonce") for
/// "amount + fee" and sends "amount" of "asset_id" to "destinations" on
/// "destination_chain_id".
#[allow(clippy::too_many_arguments)]
pub fn create_export_tx(
    network_id: u32,
    blockchain_id: ids::Id,
    destination_chain_id: ids::Id,
    from_address: H160,
    nonce: u64,
    asset_id: ids::Id,
    amount: u64,
    fee: u64,
    destinations: Vec<short::Id>,
    threshold: u32,
    locktime: u64,
) -> Result<export::Tx> {
    if threshold as usize > destinations.len() {
        return Err(Error::Config {
            message: format!(
                "threshold {} exceeds number of destinations {}",
                threshold,
                destinations.len()
            ),
        });
    }
    if amount == 0 {
        return Err(Error::Config {
            message: "export amount must be non-zero".to_string(),
        });
    }

    let input = Input::new(from_address, amount.saturating_add(fee), asset_id.clone(), nonce);
    let output = txs::transferable::Output {
        asset_id,
        out: txs::transferable::TransferableOut::TransferOutput(
            crate::key::secp256k1::txs::transfer::Output {
                amount,
                output_owners: crate::key::secp256k1::txs::OutputOwners {
                    locktime,
                    threshold,
                    addresses: destinations,
                },
            },
        ),
        ..Default::default()
    };

    Ok(export::Tx {
        metadata: None,
        network_id,
        blockchain_id,
        destination_chain_id,
        ins: vec![input],
        exported_outputs: vec![output],
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

    /// Atomic UTXO (AVAX,100); fee 10 AVAX; toAddress=evmAddr.
    /// Expected: one input consuming 100, one EVMOutput of 90, no change.
    #[test]
    fn test_create_import_tx_fee_from_inputs() {
        let sender = short::Id::from_slice(&[0x01; 20]);
        let avax = ids::Id::from_slice(&[0x09; 32]);
        let evm_addr = H160::from_slice(&[0xee; 20]);

        let atomic_utxo = transfer_utxo(0x10, &avax, 100, &sender);

        let tx = create_import_tx(
            1,
            ids::Id::from_slice(&[0xaa; 32]),
            ids::Id::from_slice(&[0xcc; 32]),
            vec![atomic_utxo],
            avax,
            10,
            vec![sender],
            evm_addr,
            0,
        )
        .unwrap();

        assert_eq!(tx.imported_inputs.len(), 1);
        assert_eq!(tx.outs.len(), 1);
        assert_eq!(tx.outs[0].amount, 90);
        assert_eq!(tx.outs[0].address, evm_addr);
    }

    #[test]
    fn test_create_import_tx_insufficient_funds() {
        let sender = short::Id::from_slice(&[0x01; 20]);
        let avax = ids::Id::from_slice(&[0x09; 32]);
        let evm_addr = H160::from_slice(&[0xee; 20]);

        let atomic_utxo = transfer_utxo(0x10, &avax, 5, &sender);

        let err = create_import_tx(
            1,
            ids::Id::from_slice(&[0xaa; 32]),
            ids::Id::from_slice(&[0xcc; 32]),
            vec![atomic_utxo],
            avax,
            10,
            vec![sender],
            evm_addr,
            0,
        )
        .unwrap_err();

        match err {
            Error::InsufficientFunds { shortfall, .. } => assert_eq!(shortfall, 5),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_create_export_tx() {
        let dest = short::Id::from_slice(&[0x02; 20]);
        let avax = ids::Id::from_slice(&[0x09; 32]);
        let from = H160::from_slice(&[0x01; 20]);

        let tx = create_export_tx(
            1,
            ids::Id::from_slice(&[0xaa; 32]),
            ids::Id::from_slice(&[0xbb; 32]),
            from,
            7,
            avax,
            100,
            10,
            vec![dest],
            1,
            0,
        )
        .unwrap();

        assert_eq!(tx.ins.len(), 1);
        assert_eq!(tx.ins[0].amount, 110);
        assert_eq!(tx.ins[0].nonce, 7);
        assert_eq!(tx.exported_outputs.len(), 1);
    }
}
