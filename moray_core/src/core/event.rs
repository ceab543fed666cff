use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

/// A resettable binary event. Triggering while nobody waits is
/// remembered, i.e. the next wait returns immediately.
pub struct Event
{
    state: Arc<(Mutex<bool>, Condvar)>,
}

impl Event
{
    pub fn new() -> Self
    {
        Event
        {
            state: Arc::new((Mutex::new(false), Condvar::new())),
        }
    }

    pub fn reset(&self)
    {
        let (mtx, _) = &*self.state;
        *mtx.lock().unwrap() = false;
    }

    pub fn wait(&self)
    {
        let (mtx, cvar) = &*self.state;
        let mut set = cvar.wait_while(mtx.lock().unwrap(), |set| !*set)
                          .unwrap();
        *set = false;
    }

    pub fn wait_with_timeout(&self, millis: u64) -> bool
    {
        let (mtx, cvar) = &*self.state;
        let guard = mtx.lock().unwrap();
        let (mut set, _) = cvar.wait_timeout_while(guard, Duration::from_millis(millis), |set| !*set)
                               .unwrap();
        if *set
        {
            *set = false;
            return true;
        }
        false
    }

    pub fn trigger(&self)
    {
        let (mtx, cvar) = &*self.state;
        *mtx.lock().unwrap() = true;
        cvar.notify_one();
    }
}

/// An event with a payload slot. The trigger side deposits a value,
/// the waiting side takes it out. Used by the channel select machinery
/// to learn which receiver fired.
pub struct DataEvent<T: Copy + Send>
{
    evt: Event,
    slot: Mutex<Option<T>>,
    pub name: String,
}

impl<T: Copy + Send> DataEvent<T>
{
    pub fn new(name: &str) -> Self
    {
        DataEvent
        {
            evt: Event::new(),
            slot: Mutex::new(None),
            name: name.to_string(),
        }
    }

    pub fn wait(&self) -> T
    {
        self.evt.wait();
        return self.slot.lock()
                        .unwrap()
                        .take()
                        .unwrap();
    }

    #[allow(dead_code)]
    pub fn wait_with_timeout(&self, millis: u64) -> Option<T>
    {
        if self.evt.wait_with_timeout(millis)
        {
            return self.slot.lock().unwrap().take();
        }
        None
    }

    pub fn trigger(&self, data: T)
    {
        *self.slot.lock().unwrap() = Some(data);
        self.evt.trigger();
    }
}
