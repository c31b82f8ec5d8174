//! Timers for alert auto-dismiss.
//!
//! The manager only needs "run this later, unless I drop the handle first".
//! [`BrowserTimer`] does that with `setTimeout`; [`ManualTimer`] is driven by
//! hand and is what the tests use.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;

/// A scheduled callback. Dropping the handle cancels it.
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl TimerHandle {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

pub trait AlertTimer {
    /// Run `callback` after `delay_ms`. Implementations must not run it
    /// before returning.
    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerHandle;
}

/// `setTimeout`-backed timer for the browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimer;

impl AlertTimer for BrowserTimer {
    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerHandle {
        // The callback ends up dropping this very Timeout through the manager,
        // so run it on the next tick, after the JS closure has returned.
        let timeout = Timeout::new(delay_ms, move || spawn_local(async move { callback() }));
        TimerHandle::new(move || drop(timeout))
    }
}

struct Pending {
    id: u64,
    due_ms: u64,
    callback: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct ManualClock {
    now_ms: u64,
    next_id: u64,
    pending: Vec<Pending>,
}

/// Timer that only moves when [`ManualTimer::advance`] is called.
#[derive(Clone, Default)]
pub struct ManualTimer {
    clock: Rc<RefCell<ManualClock>>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.borrow().now_ms
    }

    /// Callbacks scheduled and neither fired nor cancelled.
    pub fn pending(&self) -> usize {
        self.clock.borrow().pending.len()
    }

    /// Move time forward, firing due callbacks in order. Callbacks run with
    /// the clock unborrowed, so they may schedule or cancel timers.
    pub fn advance(&self, ms: u64) {
        let target = {
            let mut clock = self.clock.borrow_mut();
            clock.now_ms += ms;
            clock.now_ms
        };

        loop {
            let next = {
                let mut clock = self.clock.borrow_mut();
                let due = clock
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.due_ms <= target)
                    .min_by_key(|(_, p)| (p.due_ms, p.id))
                    .map(|(i, _)| i);
                due.map(|i| clock.pending.remove(i))
            };

            match next {
                Some(p) => (p.callback)(),
                None => break,
            }
        }
    }
}

impl AlertTimer for ManualTimer {
    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerHandle {
        let id = {
            let mut clock = self.clock.borrow_mut();
            let id = clock.next_id;
            clock.next_id += 1;
            let due_ms = clock.now_ms + u64::from(delay_ms);
            clock.pending.push(Pending {
                id,
                due_ms,
                callback,
            });
            id
        };

        let clock: Weak<RefCell<ManualClock>> = Rc::downgrade(&self.clock);
        TimerHandle::new(move || {
            if let Some(clock) = clock.upgrade() {
                clock.borrow_mut().pending.retain(|p| p.id != id);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_manual_timer_fires_when_due() {
        let timer = ManualTimer::new();
        let fired = Rc::new(Cell::new(0));

        let f = fired.clone();
        let _handle = timer.schedule(100, Box::new(move || f.set(f.get() + 1)));

        timer.advance(99);
        assert_eq!(fired.get(), 0);
        timer.advance(1);
        assert_eq!(fired.get(), 1);
        assert_eq!(timer.pending(), 0);
    }

    #[test]
    fn test_dropping_handle_cancels() {
        let timer = ManualTimer::new();
        let fired = Rc::new(Cell::new(false));

        let f = fired.clone();
        let handle = timer.schedule(10, Box::new(move || f.set(true)));
        assert_eq!(timer.pending(), 1);
        drop(handle);
        assert_eq!(timer.pending(), 0);

        timer.advance(100);
        assert!(!fired.get());
    }

    #[test]
    fn test_fires_in_due_order() {
        let timer = ManualTimer::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let o = order.clone();
        let _a = timer.schedule(30, Box::new(move || o.borrow_mut().push("a")));
        let o = order.clone();
        let _b = timer.schedule(10, Box::new(move || o.borrow_mut().push("b")));

        timer.advance(50);
        assert_eq!(*order.borrow(), vec!["b", "a"]);
    }
}
