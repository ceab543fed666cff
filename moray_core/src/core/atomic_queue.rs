use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use super::event::{DataEvent, Event};

/// A threadsafe FIFO. Besides the usual push/pop it carries an
/// optional data trigger: a shared DataEvent that fires with a caller
/// supplied id whenever data arrives, so one thread can wait on
/// several queues at once.
pub struct AtomicQueue<T>
{
    data: Mutex<VecDeque<T>>,
    data_trigger: Mutex<Option<(Arc<DataEvent<u32>>, u32)>>,
    evt: Event,
}

impl<T> AtomicQueue<T>
{
    pub fn new() -> Self
    {
        Self
        {
            data: Mutex::new(VecDeque::new()),
            data_trigger: Mutex::new(None),
            evt: Event::new(),
        }
    }

    pub fn push(&self, item: T)
    {
        self.data.lock().unwrap().push_back(item);
        self.evt.trigger();
        self.fire_data_trigger();
    }

    fn fire_data_trigger(&self)
    {
        let trigger = self.data_trigger.lock().unwrap();
        if let Some((evt, id)) = &*trigger
        {
            evt.trigger(*id);
        }
    }

    pub fn pop(&self) -> Option<T>
    {
        return self.data.lock().unwrap().pop_front();
    }

    pub fn len(&self) -> usize
    {
        return self.data.lock().unwrap().len();
    }

    pub fn wait_data(&self)
    {
        if self.len() != 0
        {
            self.evt.reset();
            return;
        }
        self.evt.wait();
    }

    pub fn wait_with_timeout(&self, milliseconds: u64) -> bool
    {
        if self.len() != 0
        {
            self.evt.reset();
            return true;
        }
        return self.evt.wait_with_timeout(milliseconds);
    }

    pub fn set_data_trigger(&self, evt: Arc<DataEvent<u32>>, trigger_data: u32)
    {
        *self.data_trigger.lock().unwrap() = Some((evt, trigger_data));

        // Data that arrived before the trigger was armed must still
        // wake the waiter.
        if self.len() != 0
        {
            self.fire_data_trigger();
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::atomic_queue::*;

    #[test]
    fn can_pop_data()
    {
        let q = AtomicQueue::new();
        q.push(32);
        let d = q.pop().unwrap();
        assert_eq!(32, d);
    }

    #[test]
    fn pop_on_empty_queue_yields_none()
    {
        let q = AtomicQueue::<u32>::new();
        assert!(q.pop().is_none());
    }

    #[test]
    fn returns_trigger_data()
    {
        let q = AtomicQueue::new();
        let e = Arc::new(DataEvent::<u32>::new("foo"));

        q.set_data_trigger(e.clone(), 7);
        q.push(10);
        let trig_data = e.wait();
        assert_eq!(7, trig_data);
    }

    #[test]
    fn trigger_fires_for_data_pushed_before_arming()
    {
        let q = AtomicQueue::new();
        let e = Arc::new(DataEvent::<u32>::new("foo"));

        q.push(10);
        q.set_data_trigger(e.clone(), 5);
        let trig_data = e.wait();
        assert_eq!(5, trig_data);
    }
}
