use std::fmt;

use crate::address::Address;

//------------ QueryResult ----------------------------------------------------

/// The result of [`crate::PrefixStore::get_net`] (spec.md §4.2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    pub found: bool,
    pub real_ip: String,
    /// The matched node's own `network/bit_length`, formatted. `None` iff
    /// `found` is `false`.
    pub network: Option<String>,
    /// The bitwise OR of `flags` across every node on the root-to-match
    /// path. Zero when there was no match.
    pub flags: u32,
}

impl QueryResult {
    pub(crate) fn no_match(addr: Address) -> Self {
        QueryResult {
            found: false,
            real_ip: addr.fmt_addr(),
            network: None,
            flags: 0,
        }
    }
}

impl fmt::Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.network {
            Some(network) => write!(
                f,
                "{} -> {} (flags: {:#x})",
                self.real_ip, network, self.flags
            ),
            None => write!(f, "{} -> no match", self.real_ip),
        }
    }
}
