use std::collections::HashMap;
use moray_core::core::shareable::Shareable;

use crate::error::ConfigError;
use crate::register::RegisterOwner;

/// Configuration-time lookup from owner identifier to owner handle.
/// Readers resolve their owner reference here exactly once, at setup,
/// and keep the returned handle. The registry does not control owner
/// lifetime; an owner stays alive as long as anything holds a handle.
pub struct OwnerRegistry
{
    owners: HashMap<String, Shareable<RegisterOwner>>,
}

impl OwnerRegistry
{
    pub fn new() -> Self
    {
        OwnerRegistry
        {
            owners: HashMap::new(),
        }
    }

    pub fn add(&mut self, owner: RegisterOwner) -> Result<Shareable<RegisterOwner>, ConfigError>
    {
        let name = owner.name().to_string();
        if self.owners.contains_key(&name)
        {
            return Err(ConfigError::DuplicateOwner(name));
        }

        let handle = Shareable::new(owner);
        self.owners.insert(name, handle.clone());
        Ok(handle)
    }

    pub fn resolve(&self, name: &str) -> Result<Shareable<RegisterOwner>, ConfigError>
    {
        match self.owners.get(name)
        {
            Some(handle) => Ok(handle.clone()),
            None => Err(ConfigError::UnknownOwner(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use moray_core::core::channel_manager::ChannelManager;
    use moray_core::trace::trace_helper::{TraceHelper, TraceLevel};
    use crate::register::RegisterOwner;
    use super::*;

    fn make_owner(name: &str, chm: &mut ChannelManager) -> RegisterOwner
    {
        let tracer = TraceHelper::new("", TraceLevel::Off, chm);
        RegisterOwner::new(name, 24, 1, tracer, chm)
    }

    #[test]
    pub fn resolves_a_registered_owner()
    {
        let mut chm = ChannelManager::new();
        let mut registry = OwnerRegistry::new();
        registry.add(make_owner("dio0", &mut chm)).unwrap();

        let handle = registry.resolve("dio0").unwrap();
        assert_eq!("dio0", handle.lock().name());
    }

    #[test]
    pub fn unknown_owner_yields_an_error()
    {
        let registry = OwnerRegistry::new();
        let result = registry.resolve("dio0");
        assert!(Err(ConfigError::UnknownOwner("dio0".to_string())) == result.map(|_| ()));
    }

    #[test]
    pub fn duplicate_owner_is_rejected()
    {
        let mut chm = ChannelManager::new();
        let mut registry = OwnerRegistry::new();
        registry.add(make_owner("dio0", &mut chm)).unwrap();

        let result = registry.add(make_owner("dio0", &mut chm));
        assert!(Err(ConfigError::DuplicateOwner("dio0".to_string())) == result.map(|_| ()));
    }
}
