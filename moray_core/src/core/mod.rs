/*

The moray core services crate contains the infrastructure shared by
the device support layer and the targets, most notably

* The typed broadcast channels and the channel manager
* The event/queue primitives the channels are built from

*/

pub mod event;
pub mod atomic_queue;
pub mod broadcast_channel;
pub mod channel_manager;
pub mod shareable;

#[macro_export]
macro_rules! wait_for {
    ($evt: ident, $id: expr, $head: expr) => (
        {
            if $head.has_data()
            {
                ($id)
            }
            else
            {
                $head.set_data_trigger($evt.clone(), $id);
                ($evt.wait())
            }
        }
    );
    ($evt: ident, $id: expr, $head: expr, $($tail: expr),+) => (
        {
            if $head.has_data()
            {
                ($id)
            }
            else
            {
                $head.set_data_trigger($evt.clone(), $id);
                (wait_for!($evt, $id + 1, $($tail),+))
            }
        }
    )
}

#[macro_export]
macro_rules! select_chan {
    ($($channels: expr),+) => (
        {
            let evt = Arc::new(DataEvent::<u32>::new("select"));
            (wait_for!(evt, 0, $($channels),+))
        }
    );
}
