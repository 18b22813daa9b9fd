//! The static admin allow-list.

use std::collections::HashSet;

use vaultops_types::Address;

/// A set of admin addresses, normalized to canonical lowercase form.
///
/// Built once from configuration (a comma-separated address list) and
/// queried with raw user-supplied strings; malformed candidates are
/// treated as non-members, never as errors.
#[derive(Clone, Debug, Default)]
pub struct AdminSet {
    addresses: HashSet<Address>,
}

impl AdminSet {
    /// Parse a comma-separated address list.
    ///
    /// Entries are trimmed; empty and malformed entries are dropped.
    pub fn from_csv(csv: &str) -> Self {
        let addresses = csv
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| Address::parse(s).ok())
            .collect();
        Self { addresses }
    }

    pub fn from_addresses(addresses: impl IntoIterator<Item = Address>) -> Self {
        Self {
            addresses: addresses.into_iter().collect(),
        }
    }

    /// Case-insensitive membership test. Malformed input is not a member.
    pub fn contains(&self, candidate: &str) -> bool {
        match Address::parse(candidate) {
            Ok(addr) => self.addresses.contains(&addr),
            Err(_) => false,
        }
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}
