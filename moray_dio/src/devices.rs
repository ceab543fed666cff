use moray_core::core::shareable::Shareable;
use moray_core::trace::trace_helper::TraceHelper;

use crate::error::ConfigError;
use crate::messages::{ClientId, CompletionMessage};
use crate::register::RegisterOwner;
use crate::writer::BitWriter;

/// The closed set of completion consumers. Which variant a client id
/// maps to is decided at configuration time; routing afterwards is a
/// plain match, no runtime subclassing.
pub enum Device
{
    RegisterInput(Shareable<RegisterOwner>),
    BitOutput(Shareable<BitWriter>),
}

/// Inbound side of the server link. Every completion is handed to
/// exactly one consumer, selected by client id; connection events fan
/// in to all register owners. Bindings are fixed once setup is done.
pub struct DeviceTable
{
    entries: Vec<(ClientId, Device)>,
    tracer: TraceHelper,
}

impl DeviceTable
{
    pub fn new(tracer: TraceHelper) -> Self
    {
        DeviceTable
        {
            entries: Vec::new(),
            tracer,
        }
    }

    pub fn bind(&mut self, client: ClientId, device: Device) -> Result<(), ConfigError>
    {
        if self.entries.iter().any(|(id, _)| *id == client)
        {
            return Err(ConfigError::DuplicateClient(client));
        }
        self.entries.push((client, device));
        Ok(())
    }

    /// Moves the completion into its consumer; it is consumed there
    /// and never seen twice. A completion for a client nobody bound
    /// is traced and dropped.
    pub fn deliver(&self, msg: CompletionMessage)
    {
        match self.entries.iter().find(|(id, _)| *id == msg.client)
        {
            Some((_, Device::RegisterInput(owner))) => owner.lock().on_update_completion(msg),
            Some((_, Device::BitOutput(writer))) =>
            {
                writer.lock().on_completion(msg);
            }
            None => self.tracer.trace(format!("completion for unknown client {} dropped", msg.client)),
        }
    }

    pub fn link_changed(&self, connected: bool)
    {
        for (_, device) in self.entries.iter()
        {
            if let Device::RegisterInput(owner) = device
            {
                owner.lock().on_link_event(connected);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use moray_core::core::broadcast_channel::GenericReceiver;
    use moray_core::core::channel_manager::ChannelManager;
    use moray_core::core::shareable::Shareable;
    use moray_core::trace::trace_helper::{TraceHelper, TraceLevel};
    use crate::messages::{CommandMessage, CompletionMessage, CompletionStatus, RegisterCommand};
    use crate::register::RegisterOwner;
    use crate::settings::WriterSetting;
    use crate::writer::{BitWriter, WriterState};
    use super::*;

    fn make_table() -> (DeviceTable, Shareable<RegisterOwner>, Shareable<BitWriter>,
                        GenericReceiver<CommandMessage>)
    {
        let mut chm = ChannelManager::new();
        let command_rx = chm.get_receiver::<CommandMessage>();
        let tracer = TraceHelper::new("", TraceLevel::Off, &mut chm);

        let owner = Shareable::new(RegisterOwner::new("dio0", 24, 1,
            TraceHelper::new("", TraceLevel::Off, &mut chm), &mut chm));
        let setting = WriterSetting
        {
            name: "out0".to_string(),
            client: 2,
            bit: 0,
        };
        let writer = Shareable::new(BitWriter::from_setting(&setting, 24,
            TraceHelper::new("", TraceLevel::Off, &mut chm), &mut chm).unwrap());

        let mut table = DeviceTable::new(tracer);
        table.bind(1, Device::RegisterInput(owner.clone())).unwrap();
        table.bind(2, Device::BitOutput(writer.clone())).unwrap();
        (table, owner, writer, command_rx)
    }

    fn completion(client: u32, value: u32) -> CompletionMessage
    {
        CompletionMessage
        {
            client,
            cmd: RegisterCommand::StartMonitor,
            status: CompletionStatus::Ok,
            value,
        }
    }

    #[test]
    pub fn routes_completions_by_client_id()
    {
        let (table, owner, writer, _cmd) = make_table();
        writer.lock().start_write(true).unwrap();

        table.deliver(completion(1, 0x4711));
        table.deliver(completion(2, 0));

        assert_eq!(0x4711, owner.lock().current_value());
        assert!(WriterState::Idle == writer.lock().state());
    }

    #[test]
    pub fn completion_for_unknown_client_is_dropped()
    {
        let (table, owner, _writer, _cmd) = make_table();
        table.deliver(completion(9, 0x4711));
        assert_eq!(0, owner.lock().current_value());
    }

    #[test]
    pub fn duplicate_client_binding_is_rejected()
    {
        let (mut table, owner, _writer, _cmd) = make_table();
        let result = table.bind(1, Device::RegisterInput(owner));
        assert!(result.is_err());
    }

    #[test]
    pub fn link_change_reaches_the_register_owners()
    {
        let (table, _owner, _writer, command_rx) = make_table();
        table.link_changed(true);

        // The owner subscribes, the writer stays quiet.
        let msg = command_rx.receive_with_timeout(1).unwrap();
        assert!(RegisterCommand::StartMonitor == msg.cmd);
        assert_eq!(1, msg.client);
        assert!(command_rx.receive_with_timeout(1).is_none());
    }
}
