use crate::core::broadcast_channel::GenericSender;
use crate::core::channel_manager::ChannelManager;
use super::TraceMessage;

/// Verbosity of a single TraceHelper. There is no process wide
/// setting; every helper gets its level injected at construction.
#[derive(Clone, Copy, PartialEq, PartialOrd, Debug)]
pub enum TraceLevel
{
    Off,
    Info,
    Debug,
}

pub struct TraceHelper
{
    source_mod: String,
    level: TraceLevel,
    trace_tx: GenericSender<TraceMessage>,
}

impl TraceHelper
{
    pub fn new(module_name: &str, level: TraceLevel, chm: &mut ChannelManager) -> Self
    {
        TraceHelper
        {
            source_mod: module_name.to_string(),
            level,
            trace_tx: chm.get_sender::<TraceMessage>(),
        }
    }

    pub fn trace(&self, message: String)
    {
        self.emit(TraceLevel::Info, message);
    }

    pub fn trace_str(&self, message: &str)
    {
        self.trace(String::from(message));
    }

    pub fn debug(&self, message: String)
    {
        self.emit(TraceLevel::Debug, message);
    }

    fn emit(&self, at: TraceLevel, message: String)
    {
        if self.level < at
        {
            return;
        }
        let final_message = format!("{}: {}", self.source_mod, message);
        self.trace_tx.send(TraceMessage::new(final_message));
    }
}
