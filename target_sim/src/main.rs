extern crate moray_core;
extern crate moray_dio;

mod server;

use moray_core::core::channel_manager::ChannelManager;
use moray_core::core::event::DataEvent;
use moray_core::trace;
use moray_core::trace::trace_helper::{TraceHelper, TraceLevel};
use moray_core::{select_chan, wait_for};
use moray_dio::messages::{CompletionMessage, LinkEvent, ScanRequest};
use moray_dio::settings::DeviceSettings;
use moray_dio::setup;

use std::sync::Arc;
use std::thread;
use std::time::Duration;

const SETTINGS_FILE: &str = "settings.json";

fn main()
{
    let mut chm = ChannelManager::new();
    trace::launch(&mut chm);
    let tracer = TraceHelper::new("SIM/Main", TraceLevel::Info, &mut chm);

    let settings = match DeviceSettings::from_file(SETTINGS_FILE)
    {
        Ok(settings) => settings,
        Err(err) =>
        {
            println!("Cannot load {}: {:?}", SETTINGS_FILE, err);
            return;
        }
    };

    // Grab the inbound endpoints before any traffic can flow.
    let completion_rx = chm.get_receiver::<CompletionMessage>();
    let link_rx = chm.get_receiver::<LinkEvent>();
    let scan_rx = chm.get_receiver::<ScanRequest>();

    let layer = match setup::build(&settings, TraceLevel::Info, &mut chm)
    {
        Ok(layer) => layer,
        Err(err) =>
        {
            println!("Device layer rejected: {:?}", err);
            return;
        }
    };
    for (record, err) in layer.rejected.iter()
    {
        tracer.trace(format!("record {} disabled: {:?}", record, err));
    }

    server::launch(&mut chm, TraceLevel::Info);

    // Dispatch loop: transport deliveries into the device layer.
    let table = layer.table;
    thread::spawn(move || {
        loop
        {
            let queue = select_chan!(completion_rx, link_rx);
            match queue
            {
                0 => table.deliver(completion_rx.receive()),
                1 => table.link_changed(link_rx.receive().connected),
                _ => {}
            }
        }
    });

    // Scan loop: stand-in for the record runtime, re-evaluating the
    // dependent readers whenever an owner signals a change.
    let readers = layer.readers;
    let scan_tracer = TraceHelper::new("SIM/Scan", TraceLevel::Info, &mut chm);
    thread::spawn(move || {
        loop
        {
            let request = scan_rx.receive();
            for reader in readers.iter().filter(|r| r.owner_name() == request.owner)
            {
                let sample = reader.evaluate();
                scan_tracer.trace(format!("{} = {} ({}/{})",
                    reader.name(), sample.bit as u32, sample.alarm.status, sample.alarm.severity));
            }
        }
    });

    // Scripted demo traffic: flip two input lines, exercise a writer
    // and watch the loopback, then drop one line again.
    let flip_tx = chm.get_sender::<server::InputFlip>();
    thread::sleep(Duration::from_millis(100));

    flip_tx.send(server::InputFlip { mask: 0x5, level: true });
    thread::sleep(Duration::from_millis(100));

    if let Some(writer) = layer.writers.first()
    {
        if let Err(err) = writer.lock().start_write(true)
        {
            tracer.trace(format!("write rejected: {:?}", err));
        }
    }
    thread::sleep(Duration::from_millis(100));

    flip_tx.send(server::InputFlip { mask: 0x4, level: false });
    thread::sleep(Duration::from_millis(200));
}
