//! One-shot completion channel for async externals.
//!
//! An async callback hands the VM a `Pending` and gives the matching
//! `Completer` to whatever will produce the result (a timer, an animation,
//! another thread). The VM polls `Pending::try_take` each time it is driven.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::value::Value;

type Cell = Arc<Mutex<Option<Value>>>;

/// Read end: held by the VM while an async call is outstanding.
#[derive(Debug)]
pub struct Pending {
    cell: Cell,
}

/// Write end: held by the host until the result is known.
#[derive(Debug)]
pub struct Completer {
    cell: Cell,
}

impl Pending {
    /// Creates a connected pending/completer pair.
    pub fn channel() -> (Pending, Completer) {
        let cell: Cell = Arc::new(Mutex::new(None));
        (Pending { cell: cell.clone() }, Completer { cell })
    }

    /// A pending result that is already complete.
    pub fn ready(value: Value) -> Pending {
        Pending {
            cell: Arc::new(Mutex::new(Some(value))),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.cell.lock().is_some()
    }

    /// Takes the result if the completer has fired.
    pub fn try_take(&self) -> Option<Value> {
        self.cell.lock().take()
    }
}

impl Completer {
    /// Delivers the result. Does nothing observable if the VM is gone.
    pub fn complete(self, value: Value) {
        *self.cell.lock() = Some(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_then_take_once() {
        let (pending, completer) = Pending::channel();
        assert!(!pending.is_complete());
        assert_eq!(pending.try_take(), None);
        completer.complete(Value::from(3.0));
        assert!(pending.is_complete());
        assert_eq!(pending.try_take(), Some(Value::from(3.0)));
        assert_eq!(pending.try_take(), None);
    }

    #[test]
    fn test_complete_from_another_thread() {
        let (pending, completer) = Pending::channel();
        std::thread::spawn(move || completer.complete(Value::from("done")))
            .join()
            .unwrap();
        assert_eq!(pending.try_take(), Some(Value::from("done")));
    }

    #[test]
    fn test_completing_after_reader_dropped() {
        let (pending, completer) = Pending::channel();
        drop(pending);
        completer.complete(Value::Nothing);
    }
}
