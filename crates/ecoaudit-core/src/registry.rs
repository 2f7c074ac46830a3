//! Canonical component registry.

use std::collections::BTreeMap;

use ecoaudit_canonical::Address;
use thiserror::Error;

use crate::identity::{ComponentIdentity, COMPONENT_COUNT};

/// Errors building a [`ComponentRegistry`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A role has no address.
    #[error("registry has no address for {0}")]
    MissingRole(ComponentIdentity),
    /// A role was given more than one address.
    #[error("registry lists {0} more than once")]
    DuplicateRole(ComponentIdentity),
    /// Two roles share one address.
    #[error("{first} and {second} share address {address}")]
    DuplicateAddress {
        /// Role that claimed the address first.
        first: ComponentIdentity,
        /// Role that claimed it again.
        second: ComponentIdentity,
        /// The shared address.
        address: Address,
    },
}

/// Canonical mapping from component role to address.
///
/// Built once when the ecosystem is initialized and read-only afterwards.
/// Every role has exactly one address and no two roles share an address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRegistry {
    addresses: [Address; COMPONENT_COUNT],
}

impl ComponentRegistry {
    /// Creates a registry from addresses in canonical role order.
    pub fn new(addresses: [Address; COMPONENT_COUNT]) -> Result<Self, RegistryError> {
        let mut seen: BTreeMap<&Address, ComponentIdentity> = BTreeMap::new();
        for role in ComponentIdentity::ALL {
            let address = &addresses[role.index()];
            if let Some(first) = seen.insert(address, role) {
                return Err(RegistryError::DuplicateAddress {
                    first,
                    second: role,
                    address: address.clone(),
                });
            }
        }
        Ok(Self { addresses })
    }

    /// Creates a registry from `(role, address)` pairs in any order.
    pub fn from_entries<I>(entries: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (ComponentIdentity, Address)>,
    {
        let mut slots: [Option<Address>; COMPONENT_COUNT] = Default::default();
        for (role, address) in entries {
            let slot = &mut slots[role.index()];
            if slot.is_some() {
                return Err(RegistryError::DuplicateRole(role));
            }
            *slot = Some(address);
        }

        let mut addresses = Vec::with_capacity(COMPONENT_COUNT);
        for role in ComponentIdentity::ALL {
            let address = slots[role.index()]
                .take()
                .ok_or(RegistryError::MissingRole(role))?;
            addresses.push(address);
        }
        let addresses: [Address; COMPONENT_COUNT] = addresses
            .try_into()
            .map_err(|_| RegistryError::MissingRole(ComponentIdentity::Pool))?;
        Self::new(addresses)
    }

    /// Canonical address of `role`.
    pub fn address(&self, role: ComponentIdentity) -> &Address {
        &self.addresses[role.index()]
    }

    /// Role that owns `address`, if any.
    pub fn role_of(&self, address: &Address) -> Option<ComponentIdentity> {
        ComponentIdentity::ALL
            .into_iter()
            .find(|role| self.address(*role) == address)
    }

    /// `(role, address)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (ComponentIdentity, &Address)> {
        ComponentIdentity::ALL
            .into_iter()
            .map(move |role| (role, self.address(role)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u8) -> Address {
        Address::parse(format!("0x{}", format!("{:02x}", n).repeat(20))).unwrap()
    }

    #[test]
    fn from_entries_accepts_any_order() {
        let entries: Vec<_> = ComponentIdentity::ALL
            .into_iter()
            .rev()
            .map(|role| (role, addr(role.index() as u8 + 1)))
            .collect();
        let registry = ComponentRegistry::from_entries(entries).unwrap();
        assert_eq!(registry.address(ComponentIdentity::Pool), &addr(1));
        assert_eq!(registry.address(ComponentIdentity::Trust), &addr(8));
        assert_eq!(registry.role_of(&addr(3)), Some(ComponentIdentity::Bank));
    }

    #[test]
    fn from_entries_rejects_missing_role() {
        let entries = ComponentIdentity::ALL
            .into_iter()
            .filter(|role| *role != ComponentIdentity::Timer)
            .map(|role| (role, addr(role.index() as u8 + 1)));
        assert_eq!(
            ComponentRegistry::from_entries(entries),
            Err(RegistryError::MissingRole(ComponentIdentity::Timer))
        );
    }

    #[test]
    fn from_entries_rejects_duplicate_role() {
        let mut entries: Vec<_> = ComponentIdentity::ALL
            .into_iter()
            .map(|role| (role, addr(role.index() as u8 + 1)))
            .collect();
        entries.push((ComponentIdentity::Bond, addr(99)));
        assert_eq!(
            ComponentRegistry::from_entries(entries),
            Err(RegistryError::DuplicateRole(ComponentIdentity::Bond))
        );
    }

    #[test]
    fn new_rejects_shared_address() {
        let mut addresses: [Address; COMPONENT_COUNT] =
            std::array::from_fn(|i| addr(i as u8 + 1));
        addresses[ComponentIdentity::Policy.index()] = addr(3);
        assert_eq!(
            ComponentRegistry::new(addresses),
            Err(RegistryError::DuplicateAddress {
                first: ComponentIdentity::Bank,
                second: ComponentIdentity::Policy,
                address: addr(3),
            })
        );
    }
}
