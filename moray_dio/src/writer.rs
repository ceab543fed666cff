use moray_core::core::channel_manager::ChannelManager;
use moray_core::trace::trace_helper::TraceHelper;

use crate::alarm::Alarm;
use crate::error::{ConfigError, WriteError};
use crate::link::ServerLink;
use crate::messages::{CompletionMessage, CompletionStatus, RegisterCommand};
use crate::settings::WriterSetting;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum WriterState
{
    Idle,
    AwaitingCompletion,
}

/// Owns a single output bit. Writes are independent per bit: each
/// writer issues its own set/clear command and receives its own
/// completion, there is no shared output register to merge into.
///
/// There is deliberately no timeout on AwaitingCompletion; if the
/// server never answers, the writer stays pending.
pub struct BitWriter
{
    name: String,
    mask: u32,
    state: WriterState,
    alarm: Alarm,
    link: ServerLink,
    tracer: TraceHelper,
}

impl BitWriter
{
    pub fn from_setting(setting: &WriterSetting, width: u32, tracer: TraceHelper, chm: &mut ChannelManager) -> Result<Self, ConfigError>
    {
        if setting.bit >= width
        {
            return Err(ConfigError::BitOutOfRange
            {
                bit: setting.bit,
                width,
            });
        }

        Ok(BitWriter
        {
            name: setting.name.clone(),
            mask: 1 << setting.bit,
            state: WriterState::Idle,
            alarm: Alarm::none(),
            link: ServerLink::new(setting.client, chm),
            tracer,
        })
    }

    pub fn name(&self) -> &str
    {
        return &self.name;
    }

    pub fn state(&self) -> WriterState
    {
        return self.state;
    }

    pub fn current_alarm(&self) -> Alarm
    {
        return self.alarm;
    }

    /// Issues a set or clear command for this writer's bit and returns
    /// immediately; the reply arrives later via on_completion. At most
    /// one command may be in flight. A second request while the first
    /// is unanswered is a caller error and leaves the pending one
    /// untouched.
    pub fn start_write(&mut self, level: bool) -> Result<(), WriteError>
    {
        if self.state == WriterState::AwaitingCompletion
        {
            self.tracer.trace(format!("{}: write rejected, completion still pending", self.name));
            return Err(WriteError::CommandPending);
        }

        let cmd = if level { RegisterCommand::SetBits } else { RegisterCommand::ClearBits };
        self.tracer.debug(format!("{}: {} mask {:#x}", self.name, cmd, self.mask));
        self.link.send(cmd, self.mask);
        self.state = WriterState::AwaitingCompletion;
        Ok(())
    }

    /// Consumes this writer's completion. Whatever the outcome, the
    /// writer is Idle afterwards; a failure only shows in the alarm.
    pub fn on_completion(&mut self, msg: CompletionMessage) -> CompletionStatus
    {
        if msg.status == CompletionStatus::Ok
        {
            self.alarm = Alarm::none();
        }
        else
        {
            self.alarm = Alarm::read_invalid();
            self.tracer.trace(format!("{}: {} completion failed", self.name, msg.cmd));
        }
        self.state = WriterState::Idle;
        return msg.status;
    }
}
