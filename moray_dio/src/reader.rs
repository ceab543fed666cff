use moray_core::core::shareable::Shareable;

use crate::alarm::Alarm;
use crate::error::ConfigError;
use crate::register::RegisterOwner;
use crate::registry::OwnerRegistry;
use crate::settings::ReaderSetting;

/// One record-level sample: the derived bit plus the owner's alarm
/// pair at the moment of evaluation.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct BitSample
{
    pub bit: bool,
    pub alarm: Alarm,
}

/// Derives a single boolean from a shared register owner. A reader
/// has no hardware access of its own; all it holds is a mask and a
/// handle to the owner, whose lifetime is independent of any reader.
pub struct BitReader
{
    name: String,
    mask: u32,
    owner: Shareable<RegisterOwner>,
}

impl BitReader
{
    /// Resolves the owner reference and validates the bit index.
    /// Only a reader that passes both checks is registered with the
    /// owner's fan-out; one that fails here never becomes operational.
    pub fn from_setting(setting: &ReaderSetting, registry: &OwnerRegistry) -> Result<Self, ConfigError>
    {
        let owner = registry.resolve(&setting.owner)?;

        let width = owner.lock().width();
        if setting.bit >= width
        {
            return Err(ConfigError::BitOutOfRange
            {
                bit: setting.bit,
                width,
            });
        }

        let reader = BitReader
        {
            name: setting.name.clone(),
            mask: 1 << setting.bit,
            owner: owner.clone(),
        };
        owner.lock().register_dependent(&reader.name);
        Ok(reader)
    }

    pub fn name(&self) -> &str
    {
        return &self.name;
    }

    pub fn owner_name(&self) -> String
    {
        return self.owner.lock().name().to_string();
    }

    /// Pure projection of the owner's current state. No I/O happens
    /// here and nothing can fail; the alarm pair is copied verbatim.
    pub fn evaluate(&self) -> BitSample
    {
        let owner = self.owner.lock();
        BitSample
        {
            bit: owner.current_value() & self.mask != 0,
            alarm: owner.current_alarm(),
        }
    }
}
