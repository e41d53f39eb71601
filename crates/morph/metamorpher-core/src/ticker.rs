//! Frame-ordered dispatch of tick deltas to attached listeners.

use log::{trace, warn};

use crate::error::MorphError;
use crate::ids::{IdAllocator, ListenerId};
use crate::interp::InterpolationStrategy;
use crate::keyframes::Time;
use crate::morpher::MetaMorpher;

/// Anything driven once per frame by an elapsed-time delta.
pub trait TickListener {
    fn tick(&mut self, delta: Time) -> Result<(), MorphError>;
}

impl<T, S: InterpolationStrategy<T>> TickListener for MetaMorpher<T, S> {
    fn tick(&mut self, delta: Time) -> Result<(), MorphError> {
        self.on_tick(delta).map(|_| ())
    }
}

/// Ordered list of listeners ticked in attachment order.
#[derive(Default)]
pub struct Ticker {
    ids: IdAllocator,
    listeners: Vec<(ListenerId, Box<dyn TickListener>)>,
    frame: u64,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, listener: Box<dyn TickListener>) -> ListenerId {
        let id = self.ids.alloc_listener();
        self.listeners.push((id, listener));
        id
    }

    /// Remove a listener; returns false if the id is unknown.
    pub fn detach(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Number of frames that completed without error.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Tick every listener once. Stops at the first failure; listeners after
    /// it are not ticked this frame.
    pub fn tick(&mut self, delta: Time) -> Result<(), MorphError> {
        trace!("frame {} delta={delta}", self.frame);
        for (id, listener) in self.listeners.iter_mut() {
            if let Err(e) = listener.tick(delta) {
                warn!("listener {id:?} failed: {e}");
                return Err(MorphError::Listener {
                    id: *id,
                    source: Box::new(e),
                });
            }
        }
        self.frame += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder {
        name: &'static str,
        log: Log,
        fail: bool,
    }

    impl TickListener for Recorder {
        fn tick(&mut self, _delta: Time) -> Result<(), MorphError> {
            self.log.borrow_mut().push(self.name);
            if self.fail {
                return Err(MorphError::InvalidDelta { delta: -1.0 });
            }
            Ok(())
        }
    }

    type Log = Rc<RefCell<Vec<&'static str>>>;

    fn recorder(name: &'static str, log: &Log, fail: bool) -> Box<Recorder> {
        Box::new(Recorder {
            name,
            log: Rc::clone(log),
            fail,
        })
    }

    #[test]
    fn dispatches_in_attach_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut ticker = Ticker::new();
        ticker.attach(recorder("a", &log, false));
        let b = ticker.attach(recorder("b", &log, false));
        ticker.attach(recorder("c", &log, false));
        ticker.tick(1.0).unwrap();
        assert!(ticker.detach(b));
        assert!(!ticker.detach(b));
        ticker.tick(1.0).unwrap();
        assert_eq!(*log.borrow(), vec!["a", "b", "c", "a", "c"]);
        assert_eq!(ticker.frame(), 2);
    }

    #[test]
    fn stops_at_first_failure() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut ticker = Ticker::new();
        ticker.attach(recorder("a", &log, false));
        let bad = ticker.attach(recorder("b", &log, true));
        ticker.attach(recorder("c", &log, false));
        let err = ticker.tick(1.0).unwrap_err();
        assert!(matches!(err, MorphError::Listener { id, .. } if id == bad));
        assert_eq!(*log.borrow(), vec!["a", "b"]);
        assert_eq!(ticker.frame(), 0);
    }
}
