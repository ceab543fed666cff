use moray_core::core::broadcast_channel::GenericSender;
use moray_core::core::channel_manager::ChannelManager;
use crate::messages::{ClientId, CommandMessage, RegisterCommand};

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ConnectionState
{
    Disconnected,
    Connected,
}

/// Outbound seam towards the register server. Bound to one client id
/// at configuration time. The channel manager creates the command
/// channel on first use, so a constructed link always has somewhere
/// to send; handing a message to the channel never blocks.
pub struct ServerLink
{
    client: ClientId,
    command_tx: GenericSender<CommandMessage>,
}

impl ServerLink
{
    pub fn new(client: ClientId, chm: &mut ChannelManager) -> Self
    {
        ServerLink
        {
            client,
            command_tx: chm.get_sender(),
        }
    }

    pub fn client(&self) -> ClientId
    {
        return self.client;
    }

    pub fn send(&self, cmd: RegisterCommand, mask: u32)
    {
        self.command_tx.send(CommandMessage
        {
            client: self.client,
            cmd,
            mask,
        });
    }
}
