//! Verifiable trait.
use crate::{errors::Result, ids::short};

/// Verifiable can be verified.
/// ref. <https://pkg.go.dev/github.com/ava-labs/avalanchego/vms/components#Verifiable>
pub trait Verifiable {
    /// Verifies the block or vertex.
    /// The protocol must ensure that its parents has already been verified.
    fn verify(&self) -> Result<()>;
}

/// Shared capability of every output/input variant that can be spent out of a
/// UTXO set: which addresses can authorize it, and whether a given address
/// set clears its threshold as of a point in time.
/// ref. <https://pkg.go.dev/github.com/ava-labs/avalanchego/vms/secp256k1fx#OutputOwners>
pub trait Spendable {
    /// True iff the output is unlocked as of `as_of` and `from_addrs`
    /// collectively meet the output's signing threshold.
    fn meets_threshold(&self, from_addrs: &[short::Id], as_of: u64) -> bool;

    /// The subset of the output's own addresses that `from_addrs` can sign
    /// with, in the output's canonical address order.
    fn spenders(&self, from_addrs: &[short::Id]) -> Vec<short::Id>;

    /// Position of `addr` in the output's address list, or "None" if absent.
    fn address_index(&self, addr: &short::Id) -> Option<u32>;
}
