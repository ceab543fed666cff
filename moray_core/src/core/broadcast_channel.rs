use std::sync::{Arc, Weak};
use super::atomic_queue::AtomicQueue;
use super::event::DataEvent;
use super::shareable::Shareable;

const GARBAGE_THRESHOLD: usize = 10;

/// The shared middle of a broadcast channel. Senders push into it,
/// every live receiver gets its own copy of each message.
pub struct ChannelImpl<T: Clone>
{
    receivers: Shareable<Vec<Weak<ReceiverQueue<T>>>>,
}

pub struct ReceiverQueue<T: Clone>
{
    owner: Arc<ChannelImpl<T>>,
    data: AtomicQueue<T>,
}

impl<T: Clone> ChannelImpl<T>
{
    pub fn new() -> Self
    {
        ChannelImpl
        {
            receivers: Shareable::new(Vec::new()),
        }
    }

    pub fn push_message(&self, data: T)
    {
        let mut queues = self.receivers.lock();
        let mut dead = 0;
        for weak in queues.iter()
        {
            match weak.upgrade()
            {
                Some(receiver) => receiver.data.push(data.clone()),
                None => dead += 1,
            }
        }

        // Dropped receivers leave dangling weak refs behind. They cost
        // memory and time on every push, so once enough have piled up
        // the list is compacted.
        if dead > GARBAGE_THRESHOLD
        {
            queues.retain(|weak| weak.upgrade().is_some());
        }
    }

    fn add_receiver(&self, receiver: Weak<ReceiverQueue<T>>)
    {
        self.receivers.lock().push(receiver)
    }
}

pub fn make_receiver<T: Clone>(owner: &Arc<ChannelImpl<T>>) -> GenericReceiver<T>
{
    let receiver = GenericReceiver::<T>::new(owner);
    owner.add_receiver(Arc::downgrade(&receiver.queue));
    receiver
}

pub fn make_sender<T: Clone>(owner: &Arc<ChannelImpl<T>>) -> GenericSender<T>
{
    GenericSender::<T>::new(owner)
}

pub struct GenericReceiver<T: Clone>
{
    queue: Arc<ReceiverQueue<T>>,
}

impl<T: Clone> GenericReceiver<T>
{
    pub fn new(owner: &Arc<ChannelImpl<T>>) -> Self
    {
        GenericReceiver
        {
            queue: Arc::new(ReceiverQueue
            {
                owner: owner.clone(),
                data: AtomicQueue::<T>::new(),
            }),
        }
    }

    pub fn create_sender(&self) -> GenericSender<T>
    {
        return make_sender(&self.queue.owner);
    }

    pub fn clone_receiver(&self) -> Self
    {
        return make_receiver(&self.queue.owner);
    }

    pub fn has_data(&self) -> bool
    {
        return self.queue.data.len() != 0;
    }

    pub fn receive(&self) -> T
    {
        /*
            Depending on how data arrives the queue can yield a None
            even after a wakeup, so we pop in a loop.
        */
        loop
        {
            if let Some(item) = self.queue.data.pop()
            {
                return item;
            }
            self.queue.data.wait_data();
        }
    }

    pub fn receive_with_timeout(&self, milliseconds: u64) -> Option<T>
    {
        self.queue.data.wait_with_timeout(milliseconds);
        return self.queue.data.pop();
    }

    pub fn set_data_trigger(&self, evt: Arc<DataEvent<u32>>, trigger_data: u32)
    {
        self.queue.data.set_data_trigger(evt, trigger_data)
    }
}

pub struct GenericSender<T: Clone>
{
    channel: Arc<ChannelImpl<T>>,
}

impl<T: Clone> GenericSender<T>
{
    pub fn new(owner: &Arc<ChannelImpl<T>>) -> Self
    {
        GenericSender
        {
            channel: owner.clone(),
        }
    }

    pub fn send(&self, data: T)
    {
        self.channel.push_message(data);
    }
}

impl<T: Clone> Clone for GenericSender<T>
{
    fn clone(&self) -> Self
    {
        GenericSender
        {
            channel: self.channel.clone(),
        }
    }
}
