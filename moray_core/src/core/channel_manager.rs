use crate::core::broadcast_channel::*;
use crate::core::shareable::Shareable;
use anymap::AnyMap;
use std::sync::Arc;

// The map only ever holds Arc<ChannelImpl<T>> entries, which are Send.
unsafe impl Send for ChannelManager {}

/// Hands out senders and receivers for arbitrary message types. There
/// is exactly one channel per message type; it springs into existence
/// the first time anybody asks for an endpoint.
pub struct ChannelManager
{
    channels: Shareable<AnyMap>,
}

impl ChannelManager
{
    pub fn new() -> Self
    {
        ChannelManager
        {
            channels: Shareable::new(AnyMap::new()),
        }
    }

    fn ensure_channel_exists<T: 'static + Clone>(&mut self)
    {
        let mut channels = self.channels.lock();
        if !channels.contains::<Arc<ChannelImpl<T>>>()
        {
            channels.insert(Arc::new(ChannelImpl::<T>::new()));
        }
    }

    pub fn get_receiver<T: 'static + Clone>(&mut self) -> GenericReceiver<T>
    {
        self.ensure_channel_exists::<T>();
        make_receiver(self.channels.lock().get::<Arc<ChannelImpl<T>>>().unwrap())
    }

    pub fn get_sender<T: 'static + Clone>(&mut self) -> GenericSender<T>
    {
        self.ensure_channel_exists::<T>();
        make_sender(self.channels.lock().get::<Arc<ChannelImpl<T>>>().unwrap())
    }
}

impl Clone for ChannelManager
{
    fn clone(&self) -> Self
    {
        Self
        {
            channels: self.channels.clone(),
        }
    }
}
