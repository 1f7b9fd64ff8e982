use crate::address::{Address, IntoAddress};
use crate::af::AddressFamily;
use crate::errors::PrefixStoreError;
use crate::query::QueryResult;
use crate::tree::{MatchResult, Tree};

//------------ PrefixStore -----------------------------------------------------

/// A longest-prefix-match lookup engine over both IPv4 and IPv6 address
/// spaces (spec.md §2): two independent binary radix tries, one per
/// family, selected by the family of each query or insertion address.
///
/// ```
/// use prefix_store::PrefixStore;
///
/// let mut store = PrefixStore::new();
/// store.add("85.0.0.0", 8, 0).unwrap(); // extra_bits = 8 -> /24
/// assert!(store.is_in("85.0.0.1").unwrap());
/// assert!(!store.is_in("85.0.1.0").unwrap());
/// ```
#[derive(Default)]
pub struct PrefixStore {
    v4: Tree<u32>,
    v6: Tree<u128>,
}

impl PrefixStore {
    /// A fresh engine with empty IPv4 and IPv6 roots.
    pub fn new() -> Self {
        PrefixStore {
            v4: Tree::new(),
            v6: Tree::new(),
        }
    }

    /// Insert `address/L` with `L = W - extra_bits` (clamped into
    /// `[0, W]`), setting `flags` on the matching node (spec.md §4.1,
    /// §6). Re-inserting the same prefix replaces its flags (last write
    /// wins); distinct prefixes along a lookup path accumulate by OR
    /// during lookup (spec.md §4.2).
    pub fn add<A: IntoAddress>(
        &mut self,
        address: A,
        extra_bits: u32,
        flags: u32,
    ) -> Result<(), PrefixStoreError> {
        match address.into_address()? {
            Address::V4(addr) => {
                let len = resolve_len(<u32 as AddressFamily>::BITS, extra_bits);
                self.v4.add(addr, len, flags);
            }
            Address::V6(addr) => {
                let len = resolve_len(<u128 as AddressFamily>::BITS, extra_bits);
                self.v6.add(addr, len, flags);
            }
        }
        Ok(())
    }

    /// `true` iff `get_net(address).found`.
    pub fn is_in<A: IntoAddress>(
        &self,
        address: A,
    ) -> Result<bool, PrefixStoreError> {
        Ok(self.get_net(address)?.found)
    }

    /// Retrieve the most-specific matching prefix and the accumulated
    /// flag word (spec.md §4.2).
    pub fn get_net<A: IntoAddress>(
        &self,
        address: A,
    ) -> Result<QueryResult, PrefixStoreError> {
        let address = address.into_address()?;
        Ok(match address {
            Address::V4(addr) => format_result(
                address,
                self.v4.lookup(addr),
                <u32 as AddressFamily>::fmt_net,
            ),
            Address::V6(addr) => format_result(
                address,
                self.v6.lookup(addr),
                <u128 as AddressFamily>::fmt_net,
            ),
        })
    }

    /// The textual dump described in spec.md §4.3.
    pub fn dump(&self) -> String {
        let mut out = String::from("IPv4 Tree:\n");
        self.v4.dump(&mut out);
        out.push('\n');
        out.push_str("IPv6 Tree:\n");
        self.v6.dump(&mut out);
        out
    }

    /// Release both trees. A subsequent call behaves exactly as it would
    /// on a freshly constructed store (spec.md §4.4, §7.4).
    pub fn teardown(&mut self) {
        *self = PrefixStore::new();
    }
}

/// `extra_bits` counts host bits; negative is rejected at the type level
/// by taking an unsigned integer, oversized values clamp to `L = 0`
/// (spec.md §4.1, §6, §7).
fn resolve_len(width: u8, extra_bits: u32) -> u8 {
    (width as u32).saturating_sub(extra_bits).min(width as u32) as u8
}

fn format_result<AF: AddressFamily>(
    address: Address,
    result: MatchResult<AF>,
    fmt_net: fn(AF) -> String,
) -> QueryResult {
    match result.matched {
        Some((network, len)) => QueryResult {
            found: true,
            real_ip: address.fmt_addr(),
            network: Some(format!("{}/{}", fmt_net(network), len)),
            flags: result.flags,
        },
        None => QueryResult::no_match(address),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extra_bits_zero_is_host_route() {
        assert_eq!(resolve_len(32, 0), 32);
    }

    #[test]
    fn extra_bits_full_width_is_default_route() {
        assert_eq!(resolve_len(32, 32), 0);
    }

    #[test]
    fn oversized_extra_bits_clamps_to_default_route() {
        assert_eq!(resolve_len(32, 1000), 0);
    }

    #[test]
    fn root_insertion_matches_everything_until_shadowed() {
        let mut store = PrefixStore::new();
        store.add("0.0.0.0", 32, 7).unwrap();
        let r = store.get_net("1.2.3.4").unwrap();
        assert!(r.found);
        assert_eq!(r.network.as_deref(), Some("0.0.0.0/0"));
        assert_eq!(r.flags, 7);
    }

    #[test]
    fn teardown_resets_to_a_fresh_store() {
        let mut store = PrefixStore::new();
        store.add("85.0.0.0", 8, 1).unwrap();
        assert!(store.is_in("85.0.0.1").unwrap());
        store.teardown();
        assert!(!store.is_in("85.0.0.1").unwrap());
        assert_eq!(store.dump(), "IPv4 Tree:\n\nIPv6 Tree:\n");
    }
}
