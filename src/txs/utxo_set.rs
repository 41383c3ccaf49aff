use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::{
    ids::{self, short},
    txs::utxo,
};

/// In-memory UTXO set: a primary ordered map keyed by UTXO id plus a
/// secondary address index, so lookups by address and iteration both stay
/// deterministic. Determinism matters here because the solver ([`crate::txs::solver`])
/// walks UTXOs in set order and must produce the same transaction for the
/// same inputs every time.
/// ref. <https://pkg.go.dev/github.com/ava-labs/avalanchego/vms/components/avax#UTXOState>
#[derive(Debug, Default, Clone)]
pub struct UtxoSet {
    by_id: BTreeMap<utxo::Id, utxo::Utxo>,
    by_address: HashMap<short::Id, BTreeSet<utxo::Id>>,
}

impl UtxoSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a UTXO, indexing it by every address in its output. Adding the
    /// same UTXO id again just overwrites the prior entry.
    pub fn add(&mut self, utxo: utxo::Utxo) {
        let id = utxo.utxo_id.clone();
        for addr in utxo.addresses() {
            self.by_address
                .entry(addr)
                .or_insert_with(BTreeSet::new)
                .insert(id.clone());
        }
        self.by_id.insert(id, utxo);
    }

    /// Removes a UTXO from both the primary map and the address index.
    pub fn remove(&mut self, id: &utxo::Id) -> Option<utxo::Utxo> {
        let removed = self.by_id.remove(id)?;
        for addr in removed.addresses() {
            if let Some(ids) = self.by_address.get_mut(&addr) {
                ids.remove(id);
                if ids.is_empty() {
                    self.by_address.remove(&addr);
                }
            }
        }
        Some(removed)
    }

    pub fn get(&self, id: &utxo::Id) -> Option<&utxo::Utxo> {
        self.by_id.get(id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// All UTXOs, in stable ("by_id") order.
    pub fn get_all_utxos(&self) -> Vec<utxo::Utxo> {
        self.by_id.values().cloned().collect()
    }

    /// All UTXOs owned (in full or in part) by "addr", in stable order.
    pub fn get_utxos_by_address(&self, addr: &short::Id) -> Vec<utxo::Utxo> {
        match self.by_address.get(addr) {
            Some(ids) => ids
                .iter()
                .filter_map(|id| self.by_id.get(id).cloned())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Sums the amount of "asset_id" spendable by "addrs" as of "as_of".
    pub fn get_balance(&self, addrs: &[short::Id], asset_id: &ids::Id, as_of: u64) -> u64 {
        let mut seen: BTreeSet<utxo::Id> = BTreeSet::new();
        let mut balance: u64 = 0;
        for addr in addrs {
            for id in self
                .by_address
                .get(addr)
                .map(|ids| ids.iter().collect::<Vec<_>>())
                .unwrap_or_default()
            {
                if !seen.insert(id.clone()) {
                    continue;
                }
                let Some(u) = self.by_id.get(id) else {
                    continue;
                };
                if &u.asset_id != asset_id {
                    continue;
                }
                if u.meets_threshold(addrs, as_of) {
                    balance += u.amount();
                }
            }
        }
        balance
    }
}

/// RUST_LOG=debug cargo test --package avalanche-types --lib -- txs::utxo_set::test_add_remove_get --exact --show-output
#[test]
fn test_add_remove_get() {
    use crate::key;

    let addr = short::Id::from_slice(&[0x01; 20]);
    let asset_id = ids::Id::from_slice(&[0x02; 32]);

    let u = utxo::Utxo {
        utxo_id: utxo::Id::new(&[0x03; 32], 0, false).unwrap(),
        asset_id: asset_id.clone(),
        transfer_output: Some(key::secp256k1::txs::transfer::Output {
            amount: 500,
            output_owners: key::secp256k1::txs::OutputOwners {
                locktime: 0,
                threshold: 1,
                addresses: vec![addr.clone()],
            },
        }),
        ..utxo::Utxo::default()
    };

    let mut set = UtxoSet::new();
    assert!(set.is_empty());
    set.add(u.clone());
    assert_eq!(set.len(), 1);
    assert_eq!(set.get_all_utxos(), vec![u.clone()]);
    assert_eq!(set.get_utxos_by_address(&addr), vec![u.clone()]);
    assert_eq!(set.get_balance(&[addr.clone()], &asset_id, 0), 500);

    let removed = set.remove(&u.utxo_id).unwrap();
    assert_eq!(removed, u);
    assert!(set.is_empty());
    assert!(set.get_utxos_by_address(&addr).is_empty());
}

/// RUST_LOG=debug cargo test --package avalanche-types --lib -- txs::utxo_set::test_get_balance_respects_locktime --exact --show-output
#[test]
fn test_get_balance_respects_locktime() {
    use crate::key;

    let addr = short::Id::from_slice(&[0x05; 20]);
    let asset_id = ids::Id::from_slice(&[0x06; 32]);

    let locked = utxo::Utxo {
        utxo_id: utxo::Id::new(&[0x07; 32], 0, false).unwrap(),
        asset_id: asset_id.clone(),
        transfer_output: Some(key::secp256k1::txs::transfer::Output {
            amount: 100,
            output_owners: key::secp256k1::txs::OutputOwners {
                locktime: 1_000,
                threshold: 1,
                addresses: vec![addr.clone()],
            },
        }),
        ..utxo::Utxo::default()
    };

    let mut set = UtxoSet::new();
    set.add(locked);

    assert_eq!(set.get_balance(&[addr.clone()], &asset_id, 1), 0);
    assert_eq!(set.get_balance(&[addr], &asset_id, 1_000), 100);
}
