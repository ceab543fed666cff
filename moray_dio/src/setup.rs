use moray_core::core::channel_manager::ChannelManager;
use moray_core::core::shareable::Shareable;
use moray_core::trace::trace_helper::{TraceHelper, TraceLevel};

use crate::devices::{Device, DeviceTable};
use crate::error::ConfigError;
use crate::reader::BitReader;
use crate::register::RegisterOwner;
use crate::registry::OwnerRegistry;
use crate::settings::DeviceSettings;
use crate::writer::BitWriter;

/// Everything the setup phase produced. The table is the inbound
/// seam, the readers belong to the scan side, the writers to whoever
/// issues output commands.
pub struct DeviceLayer
{
    pub registry: OwnerRegistry,
    pub table: DeviceTable,
    pub readers: Vec<BitReader>,
    pub writers: Vec<Shareable<BitWriter>>,
    pub rejected: Vec<(String, ConfigError)>,
}

/// Builds the whole device layer from settings. A fault in the shared
/// register itself aborts the build; a fault in an individual reader
/// or writer only disables that record and is reported in `rejected`,
/// the rest of the layer still comes up.
pub fn build(settings: &DeviceSettings, level: TraceLevel, chm: &mut ChannelManager) -> Result<DeviceLayer, ConfigError>
{
    let width = settings.register.width;

    let mut registry = OwnerRegistry::new();
    let owner = RegisterOwner::new(&settings.register.name, width, settings.register.client,
        TraceHelper::new("DIO/Register", level, chm), chm);
    let owner_handle = registry.add(owner)?;

    let mut table = DeviceTable::new(TraceHelper::new("DIO/Dispatch", level, chm));
    table.bind(settings.register.client, Device::RegisterInput(owner_handle))?;

    let mut readers = Vec::new();
    let mut writers = Vec::new();
    let mut rejected = Vec::new();

    for setting in settings.readers.iter()
    {
        match BitReader::from_setting(setting, &registry)
        {
            Ok(reader) => readers.push(reader),
            Err(err) => rejected.push((setting.name.clone(), err)),
        }
    }

    for setting in settings.writers.iter()
    {
        let tracer = TraceHelper::new("DIO/Writer", level, chm);
        match BitWriter::from_setting(setting, width, tracer, chm)
        {
            Ok(writer) =>
            {
                let handle = Shareable::new(writer);
                match table.bind(setting.client, Device::BitOutput(handle.clone()))
                {
                    Ok(()) => writers.push(handle),
                    Err(err) => rejected.push((setting.name.clone(), err)),
                }
            }
            Err(err) => rejected.push((setting.name.clone(), err)),
        }
    }

    Ok(DeviceLayer
    {
        registry,
        table,
        readers,
        writers,
        rejected,
    })
}
