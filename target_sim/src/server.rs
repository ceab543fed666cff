use moray_core::core::broadcast_channel::{GenericReceiver, GenericSender};
use moray_core::core::channel_manager::ChannelManager;
use moray_core::core::event::DataEvent;
use moray_core::trace::trace_helper::{TraceHelper, TraceLevel};
use moray_core::{select_chan, wait_for};
use moray_dio::messages::{ClientId, CommandMessage, CompletionMessage, CompletionStatus, LinkEvent, RegisterCommand};

use std::sync::Arc;
use std::thread;

/// External signal change injected into the simulated input lines.
#[derive(Clone, Copy)]
pub struct InputFlip
{
    pub mask: u32,
    pub level: bool,
}

pub fn launch(chm: &mut ChannelManager, level: TraceLevel)
{
    let tracer = TraceHelper::new("SIM/Server", level, chm);
    let mut server = SimServer::new(tracer, chm);
    thread::spawn(move || {
        server.announce();
        loop
        {
            if !server.run()
            {
                break;
            }
        }
    });
}

/// Stands in for the remote polling task: owns the raw register,
/// detects changes and pushes the whole value to its monitor
/// subscriber, so no consumer ever polls a single bit.
pub struct SimServer
{
    register: u32,
    monitor: Option<ClientId>,
    command_rx: GenericReceiver<CommandMessage>,
    input_rx: GenericReceiver<InputFlip>,
    completion_tx: GenericSender<CompletionMessage>,
    link_tx: GenericSender<LinkEvent>,
    tracer: TraceHelper,
}

impl SimServer
{
    pub fn new(tracer: TraceHelper, chm: &mut ChannelManager) -> Self
    {
        SimServer
        {
            register: 0,
            monitor: None,
            command_rx: chm.get_receiver(),
            input_rx: chm.get_receiver(),
            completion_tx: chm.get_sender(),
            link_tx: chm.get_sender(),
            tracer,
        }
    }

    /// The transport comes up together with the server thread.
    pub fn announce(&self)
    {
        self.link_tx.send(LinkEvent
        {
            connected: true,
        });
    }

    pub fn run(&mut self) -> bool
    {
        let queue = select_chan!(self.command_rx, self.input_rx);
        match queue
        {
            0 =>
            {
                let cmd = self.command_rx.receive();
                self.process_command(cmd);
            }
            1 =>
            {
                let flip = self.input_rx.receive();
                self.apply_flip(flip);
            }
            _ => {}
        }
        true
    }

    pub fn process_command(&mut self, cmd: CommandMessage)
    {
        match cmd.cmd
        {
            RegisterCommand::StartMonitor =>
            {
                self.tracer.trace(format!("monitor subscription from client {}", cmd.client));
                self.monitor = Some(cmd.client);
                // Prime the new subscriber with the current state.
                self.reply(&cmd, self.register);
            }
            RegisterCommand::SetBits =>
            {
                let next = self.register | cmd.mask;
                self.switch_outputs(cmd, next);
            }
            RegisterCommand::ClearBits =>
            {
                let next = self.register & !cmd.mask;
                self.switch_outputs(cmd, next);
            }
        }
    }

    fn switch_outputs(&mut self, cmd: CommandMessage, next: u32)
    {
        let changed = next != self.register;
        self.register = next;
        self.reply(&cmd, self.register);

        // Outputs are wired back into the register, so a write shows
        // up as an input change for the monitor as well.
        if changed
        {
            self.push_update();
        }
    }

    pub fn apply_flip(&mut self, flip: InputFlip)
    {
        let next = if flip.level { self.register | flip.mask } else { self.register & !flip.mask };
        if next == self.register
        {
            return;
        }
        self.register = next;
        self.push_update();
    }

    fn reply(&self, cmd: &CommandMessage, value: u32)
    {
        self.completion_tx.send(CompletionMessage
        {
            client: cmd.client,
            cmd: cmd.cmd,
            status: CompletionStatus::Ok,
            value,
        });
    }

    fn push_update(&self)
    {
        if let Some(client) = self.monitor
        {
            self.tracer.debug(format!("pushing {:#08x}", self.register));
            self.completion_tx.send(CompletionMessage
            {
                client,
                cmd: RegisterCommand::StartMonitor,
                status: CompletionStatus::Ok,
                value: self.register,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use moray_core::core::broadcast_channel::GenericReceiver;
    use moray_core::core::channel_manager::ChannelManager;
    use moray_core::trace::trace_helper::{TraceHelper, TraceLevel};
    use moray_dio::messages::{CommandMessage, CompletionMessage, CompletionStatus, RegisterCommand, ScanRequest};
    use moray_dio::settings::DeviceSettings;
    use moray_dio::setup;
    use super::*;

    fn make_server() -> (SimServer, GenericReceiver<CompletionMessage>, ChannelManager)
    {
        let mut chm = ChannelManager::new();
        let completion_rx = chm.get_receiver::<CompletionMessage>();
        let tracer = TraceHelper::new("", TraceLevel::Off, &mut chm);
        let server = SimServer::new(tracer, &mut chm);
        (server, completion_rx, chm)
    }

    fn command(client: u32, cmd: RegisterCommand, mask: u32) -> CommandMessage
    {
        CommandMessage
        {
            client,
            cmd,
            mask,
        }
    }

    #[test]
    pub fn start_monitor_primes_the_subscriber()
    {
        let (mut server, completion_rx, _chm) = make_server();
        server.apply_flip(InputFlip { mask: 0x3, level: true });

        server.process_command(command(1, RegisterCommand::StartMonitor, 0));

        let msg = completion_rx.receive_with_timeout(1).unwrap();
        assert_eq!(1, msg.client);
        assert!(CompletionStatus::Ok == msg.status);
        assert_eq!(0x3, msg.value);
    }

    #[test]
    pub fn set_bits_acks_the_writer_and_pushes_to_the_monitor()
    {
        let (mut server, completion_rx, _chm) = make_server();
        server.process_command(command(1, RegisterCommand::StartMonitor, 0));
        let _ = completion_rx.receive_with_timeout(1);

        server.process_command(command(2, RegisterCommand::SetBits, 0x4));

        let ack = completion_rx.receive_with_timeout(1).unwrap();
        assert_eq!(2, ack.client);
        assert!(RegisterCommand::SetBits == ack.cmd);

        let push = completion_rx.receive_with_timeout(1).unwrap();
        assert_eq!(1, push.client);
        assert_eq!(0x4, push.value);
    }

    #[test]
    pub fn flips_only_push_on_actual_change()
    {
        let (mut server, completion_rx, _chm) = make_server();
        server.process_command(command(1, RegisterCommand::StartMonitor, 0));
        let _ = completion_rx.receive_with_timeout(1);

        server.apply_flip(InputFlip { mask: 0x1, level: true });
        assert!(completion_rx.receive_with_timeout(1).is_some());

        // Same level again, nothing changes, nothing is pushed.
        server.apply_flip(InputFlip { mask: 0x1, level: true });
        assert!(completion_rx.receive_with_timeout(1).is_none());
    }

    #[test]
    pub fn a_write_loops_back_into_the_readers()
    {
        let mut chm = ChannelManager::new();
        let completion_rx = chm.get_receiver::<CompletionMessage>();
        let scan_rx = chm.get_receiver::<ScanRequest>();

        let settings = DeviceSettings::from_str(r#"
            {
                "register": { "name": "dio0", "client": 1, "width": 24 },
                "readers": [ { "name": "bit2", "owner": "dio0", "bit": 2 } ],
                "writers": [ { "name": "out2", "client": 2, "bit": 2 } ]
            }"#).unwrap();
        let layer = setup::build(&settings, TraceLevel::Off, &mut chm).unwrap();

        let tracer = TraceHelper::new("", TraceLevel::Off, &mut chm);
        let mut server = SimServer::new(tracer, &mut chm);

        // Connect: the owner subscribes, the server primes it.
        layer.table.link_changed(true);
        server.run();
        layer.table.deliver(completion_rx.receive_with_timeout(1).unwrap());
        assert!(scan_rx.receive_with_timeout(1).is_some());

        // Write the bit and route the resulting traffic.
        layer.writers[0].lock().start_write(true).unwrap();
        server.run();
        layer.table.deliver(completion_rx.receive_with_timeout(1).unwrap());
        layer.table.deliver(completion_rx.receive_with_timeout(1).unwrap());

        assert!(scan_rx.receive_with_timeout(1).is_some());
        assert!(layer.readers[0].evaluate().bit);
        assert!(layer.readers[0].evaluate().alarm.is_healthy());
    }
}
