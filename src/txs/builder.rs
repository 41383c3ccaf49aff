//! Shared demand-building guards used by every chain's high-level transaction
//! builders (`avm::txs`, `platformvm::txs`, `evm::atomic`) on top of the
//! [`crate::txs::solver::spend`] demand solver.
use crate::{
    errors::{Error, Result},
    ids::short,
    txs::solver::AssetAmountDestination,
};

/// Builds the demand list for a plain payment of "amount" of "asset_id" plus
/// a network fee of "fee" in "fee_asset_id", collapsing both into a single
/// demand when they share an asset (the common AVAX-pays-its-own-fee case).
/// Returns "Ok(None)" when "amount == 0": a no-op payment emits no transaction.
/// ref. <https://pkg.go.dev/github.com/ava-labs/avalanchego/vms/platformvm/txs/builder#Builder.NewBaseTx>
#[allow(clippy::too_many_arguments)]
pub fn base_tx_demands(
    asset_id: crate::ids::Id,
    amount: u64,
    fee_asset_id: crate::ids::Id,
    fee: u64,
    senders: Vec<short::Id>,
    destinations: Vec<short::Id>,
    change_addresses: Vec<short::Id>,
    threshold: u32,
) -> Result<Option<Vec<AssetAmountDestination>>> {
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
        return Ok(None);
    }

    let mut demand = AssetAmountDestination::new(asset_id.clone(), amount, 0);
    demand.senders = senders.clone();
    demand.destinations = destinations;
    demand.change_addresses = change_addresses.clone();
    demand.threshold = threshold;

    if asset_id == fee_asset_id {
        demand.burn = fee;
        return Ok(Some(vec![demand]));
    }

    let mut fee_demand = AssetAmountDestination::new(fee_asset_id, 0, fee);
    fee_demand.senders = senders;
    fee_demand.change_addresses = change_addresses;
    Ok(Some(vec![demand, fee_demand]))
}
