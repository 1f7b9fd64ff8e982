use std::net::IpAddr;
use std::str::FromStr;

use crate::errors::PrefixStoreError;

//------------ Address -------------------------------------------------------

/// An address carrying its own family, accepted either as parsed text or as
/// a pre-parsed integer (spec.md §6: "Address inputs accept either a
/// dotted-quad / colon-hex textual form or an integer address object
/// carrying its family").
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Address {
    V4(u32),
    V6(u128),
}

impl Address {
    /// Parse a dotted-quad or colon-hex address. IPv4 and IPv6 forms are
    /// distinguished syntactically by `std::net::IpAddr`'s own parser.
    pub fn parse(text: &str) -> Result<Self, PrefixStoreError> {
        IpAddr::from_str(text)
            .map(Address::from)
            .map_err(|_| PrefixStoreError::MalformedAddress(text.to_string()))
    }

    pub fn fmt_addr(self) -> String {
        match self {
            Address::V4(a) => std::net::Ipv4Addr::from(a).to_string(),
            Address::V6(a) => std::net::Ipv6Addr::from(a).to_string(),
        }
    }
}

impl From<IpAddr> for Address {
    fn from(ip: IpAddr) -> Self {
        match ip {
            IpAddr::V4(v4) => Address::V4(u32::from(v4)),
            IpAddr::V6(v6) => Address::V6(u128::from(v6)),
        }
    }
}

impl From<std::net::Ipv4Addr> for Address {
    fn from(v4: std::net::Ipv4Addr) -> Self {
        Address::V4(u32::from(v4))
    }
}

impl From<std::net::Ipv6Addr> for Address {
    fn from(v6: std::net::Ipv6Addr) -> Self {
        Address::V6(u128::from(v6))
    }
}

impl From<u32> for Address {
    fn from(v4: u32) -> Self {
        Address::V4(v4)
    }
}

impl From<u128> for Address {
    fn from(v6: u128) -> Self {
        Address::V6(v6)
    }
}

/// Anything that can be turned into an [`Address`] for the public API
/// (`PrefixStore::add`/`is_in`/`get_net`) — textual forms included, so
/// callers don't have to parse first.
pub trait IntoAddress {
    fn into_address(self) -> Result<Address, PrefixStoreError>;
}

impl IntoAddress for Address {
    fn into_address(self) -> Result<Address, PrefixStoreError> {
        Ok(self)
    }
}

impl IntoAddress for &str {
    fn into_address(self) -> Result<Address, PrefixStoreError> {
        Address::parse(self)
    }
}

impl IntoAddress for IpAddr {
    fn into_address(self) -> Result<Address, PrefixStoreError> {
        Ok(Address::from(self))
    }
}

impl IntoAddress for std::net::Ipv4Addr {
    fn into_address(self) -> Result<Address, PrefixStoreError> {
        Ok(Address::from(self))
    }
}

impl IntoAddress for std::net::Ipv6Addr {
    fn into_address(self) -> Result<Address, PrefixStoreError> {
        Ok(Address::from(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_v4() {
        assert_eq!(Address::parse("85.0.0.1").unwrap(), Address::V4(0x5500_0001));
    }

    #[test]
    fn parses_v6() {
        let a = Address::parse("::1").unwrap();
        assert_eq!(a, Address::V6(1));
    }

    #[test]
    fn rejects_garbage() {
        assert!(Address::parse("not-an-address").is_err());
    }

    #[test]
    fn roundtrips_through_fmt() {
        let a = Address::parse("85.0.0.1").unwrap();
        assert_eq!(a.fmt_addr(), "85.0.0.1");
    }
}
