use crate::core::channel_manager::ChannelManager;
use std::io::{self, Write};
use std::thread;

pub mod trace_helper;

#[derive(Clone)]
pub struct TraceMessage
{
    stamp: chrono::DateTime<chrono::Local>,
    text: String,
}

impl TraceMessage
{
    pub fn new(text: String) -> Self
    {
        TraceMessage
        {
            stamp: chrono::Local::now(),
            text,
        }
    }
}

/// Drains the trace channel to stdout. Call once per process, before
/// any module starts emitting.
pub fn launch(chm: &mut ChannelManager)
{
    let trace_rx = chm.get_receiver::<TraceMessage>();

    let _ = thread::Builder::new().name("Trace".to_string()).spawn(move || {
        loop
        {
            let message = trace_rx.receive();
            println!("{} {}", message.stamp.format("%H:%M:%S%.3f"), message.text);
            let _ = io::stdout().flush();
        }
    });
}
