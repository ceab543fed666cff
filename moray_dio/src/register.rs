use moray_core::core::broadcast_channel::GenericSender;
use moray_core::core::channel_manager::ChannelManager;
use moray_core::trace::trace_helper::TraceHelper;

use crate::alarm::Alarm;
use crate::link::{ConnectionState, ServerLink};
use crate::messages::{ClientId, CompletionMessage, CompletionStatus, LinkState, RegisterCommand, ScanRequest};

/// # The register owner
/// Owns the canonical value of one multi-bit input register. The
/// remote server polls the hardware; whenever any line changes it
/// pushes the whole register here as an update completion. Dependent
/// bit readers never touch hardware, they derive their bit from this
/// value and are re-scanned whenever it moves.
///
/// The owner is purely reactive: it is driven by completions and
/// connection events, it never polls by itself.
pub struct RegisterOwner
{
    name: String,
    width: u32,
    value: u32,
    alarm: Alarm,
    connection: ConnectionState,
    link: ServerLink,
    scan_tx: GenericSender<ScanRequest>,
    link_state_tx: GenericSender<LinkState>,
    dependents: Vec<String>,
    tracer: TraceHelper,
}

impl RegisterOwner
{
    pub fn new(name: &str, width: u32, client: ClientId, tracer: TraceHelper, chm: &mut ChannelManager) -> Self
    {
        RegisterOwner
        {
            name: name.to_string(),
            width,
            value: 0,
            // Nothing has been read yet, so the register reads as
            // invalid until the first good completion arrives.
            alarm: Alarm::read_invalid(),
            connection: ConnectionState::Disconnected,
            link: ServerLink::new(client, chm),
            scan_tx: chm.get_sender(),
            link_state_tx: chm.get_sender(),
            dependents: Vec::new(),
            tracer,
        }
    }

    pub fn name(&self) -> &str
    {
        return &self.name;
    }

    pub fn width(&self) -> u32
    {
        return self.width;
    }

    pub fn client(&self) -> ClientId
    {
        return self.link.client();
    }

    pub fn current_value(&self) -> u32
    {
        return self.value;
    }

    pub fn current_alarm(&self) -> Alarm
    {
        return self.alarm;
    }

    pub fn connection(&self) -> ConnectionState
    {
        return self.connection;
    }

    /// Adds a bit reader to the fan-out set. Configuration time only;
    /// the set is read-only once the layer is up.
    pub fn register_dependent(&mut self, record: &str)
    {
        self.dependents.push(record.to_string());
    }

    pub fn dependent_count(&self) -> usize
    {
        return self.dependents.len();
    }

    /// Consumes one update completion. A good completion replaces the
    /// value wholesale, a bad one leaves the last good value in place
    /// and degrades to an alarm. Either way the dependents are asked
    /// to re-scan, and only after the state is current, so they can
    /// never observe the old value with the new alarm or vice versa.
    pub fn on_update_completion(&mut self, msg: CompletionMessage)
    {
        if msg.status == CompletionStatus::Ok
        {
            self.value = msg.value;
            self.alarm = Alarm::none();
            self.tracer.debug(format!("{}: value now {:#08x}", self.name, self.value));
        }
        else
        {
            self.alarm = Alarm::read_invalid();
            self.tracer.trace(format!("{}: {} completion failed", self.name, msg.cmd));
        }

        self.scan_tx.send(ScanRequest
        {
            owner: self.name.clone(),
        });
    }

    /// Connect/disconnect from the transport. On every transition into
    /// Connected the server is asked to push monitor updates; the
    /// request is tied to the transition, not to any record being
    /// scanned, so a reconnecting server is re-subscribed exactly once.
    /// Afterwards the event is forwarded for the runtime adapter's own
    /// connection bookkeeping.
    pub fn on_link_event(&mut self, connected: bool)
    {
        let next = if connected { ConnectionState::Connected } else { ConnectionState::Disconnected };

        if next == ConnectionState::Connected && self.connection != ConnectionState::Connected
        {
            self.tracer.trace(format!("{}: connected, requesting monitor pushes", self.name));
            self.link.send(RegisterCommand::StartMonitor, 0);
        }
        self.connection = next;

        self.link_state_tx.send(LinkState
        {
            owner: self.name.clone(),
            connected,
        });
    }
}
