use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::state::{
    AlertAction, AlertCallback, AlertContent, AlertState, AlertVariant, DEFAULT_TIMEOUT_MS,
};
use super::timer::{AlertTimer, TimerHandle};

pub type DisplayHandler = Rc<dyn Fn(AlertState)>;

/// Callbacks and timer of the alert currently on screen.
struct Active {
    seq: u64,
    on_dismiss: Option<AlertCallback>,
    action: Option<AlertAction>,
    _timer: Option<TimerHandle>,
}

struct Inner {
    handler: Option<DisplayHandler>,
    timer: Box<dyn AlertTimer>,
    default_timeout_ms: u32,
    state: AlertState,
    active: Option<Active>,
    next_seq: u64,
}

/// Single-slot alert dialog state machine: idle (`open == false`) or
/// showing. Showing a new alert replaces the current one and cancels its
/// timer without running its `on_dismiss`.
///
/// Cheap to clone; clones share the same state. No user callback runs while
/// the internal state is borrowed, so callbacks may raise new alerts.
#[derive(Clone)]
pub struct AlertManager {
    inner: Rc<RefCell<Inner>>,
}

impl AlertManager {
    pub fn new(timer: impl AlertTimer + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                handler: None,
                timer: Box::new(timer),
                default_timeout_ms: DEFAULT_TIMEOUT_MS,
                state: AlertState::default(),
                active: None,
                next_seq: 1,
            })),
        }
    }

    /// Timeout applied when an alert does not set its own.
    pub fn with_default_timeout(self, ms: u32) -> Self {
        self.inner.borrow_mut().default_timeout_ms = ms;
        self
    }

    /// Bind the function that pushes state into the rendered dialog.
    /// The current state is pushed right away.
    pub fn register_display_handler(&self, handler: impl Fn(AlertState) + 'static) {
        let handler: DisplayHandler = Rc::new(handler);
        let state = {
            let mut inner = self.inner.borrow_mut();
            if inner.handler.is_some() {
                log::debug!("alert display handler replaced");
            }
            inner.handler = Some(handler.clone());
            inner.state.clone()
        };
        handler(state);
    }

    pub fn unregister_display_handler(&self) {
        self.inner.borrow_mut().handler = None;
    }

    pub fn has_display_handler(&self) -> bool {
        self.inner.borrow().handler.is_some()
    }

    pub fn success(&self, title: impl Into<String>, content: impl Into<AlertContent>) {
        self.show(title.into(), content.into(), AlertVariant::Success);
    }

    pub fn error(&self, title: impl Into<String>, content: impl Into<AlertContent>) {
        self.show(title.into(), content.into(), AlertVariant::Error);
    }

    pub fn info(&self, title: impl Into<String>, content: impl Into<AlertContent>) {
        self.show(title.into(), content.into(), AlertVariant::Default);
    }

    fn show(&self, title: String, content: AlertContent, variant: AlertVariant) {
        let weak = Rc::downgrade(&self.inner);

        let (handler, state, replaced) = {
            let mut inner = self.inner.borrow_mut();
            let Some(handler) = inner.handler.clone() else {
                log::warn!(
                    "alert '{}' dropped: no display handler registered (mount AlertProvider first)",
                    title
                );
                return;
            };

            let seq = inner.next_seq;
            inner.next_seq += 1;

            let AlertContent {
                description,
                options,
            } = content;
            let timeout_ms = options.timeout_ms.unwrap_or(inner.default_timeout_ms);

            let timer = (timeout_ms > 0).then(|| {
                inner
                    .timer
                    .schedule(timeout_ms, Box::new(move || Self::expire(&weak, seq)))
            });

            inner.state = AlertState {
                open: true,
                title,
                description,
                variant,
                timeout_ms,
                action_label: options.action.as_ref().map(|a| a.label.clone()),
            };

            let replaced = inner.active.replace(Active {
                seq,
                on_dismiss: options.on_dismiss,
                action: options.action,
                _timer: timer,
            });

            (handler, inner.state.clone(), replaced)
        };

        // Cancels the replaced alert's timer.
        drop(replaced);
        handler(state);
    }

    fn expire(weak: &Weak<RefCell<Inner>>, seq: u64) {
        if let Some(inner) = weak.upgrade() {
            AlertManager { inner }.dismiss_matching(Some(seq));
        }
    }

    /// Close the alert on screen: run its `on_dismiss` once, then go idle.
    /// Returns `false` when nothing was showing.
    pub fn dismiss(&self) -> bool {
        self.dismiss_matching(None)
    }

    /// Run the action callback, then the regular dismiss flow.
    /// Returns `false` when the current alert has no action.
    pub fn run_action(&self) -> bool {
        let found = {
            let inner = self.inner.borrow();
            inner
                .active
                .as_ref()
                .and_then(|a| a.action.clone().map(|action| (a.seq, action)))
        };

        let Some((seq, action)) = found else {
            return false;
        };

        (action.on_click)();
        self.dismiss_matching(Some(seq));
        true
    }

    fn dismiss_matching(&self, seq: Option<u64>) -> bool {
        let taken = {
            let mut inner = self.inner.borrow_mut();
            let matches = match (&inner.active, seq) {
                (Some(active), Some(seq)) => active.seq == seq,
                (Some(_), None) => true,
                (None, _) => false,
            };
            if matches {
                inner.active.take()
            } else {
                None
            }
        };

        let Some(mut active) = taken else {
            return false;
        };
        let seq = active.seq;
        let on_dismiss = active.on_dismiss.take();
        // Cancel the timer before any callback runs.
        drop(active);

        if let Some(on_dismiss) = on_dismiss {
            on_dismiss();
        }

        let published = {
            let mut inner = self.inner.borrow_mut();
            // on_dismiss may have shown another alert; leave that one alone.
            if inner.active.is_none() {
                inner.state.open = false;
                inner.state.action_label = None;
                inner.handler.clone().map(|h| (h, inner.state.clone()))
            } else {
                log::debug!("alert #{} replaced while dismissing", seq);
                None
            }
        };

        if let Some((handler, state)) = published {
            handler(state);
        }
        true
    }

    pub fn current(&self) -> AlertState {
        self.inner.borrow().state.clone()
    }

    pub fn is_open(&self) -> bool {
        self.inner.borrow().state.open
    }

    /// Back to a fresh manager: no handler, no alert, pending timer cancelled.
    /// Callbacks of the dropped alert are not run.
    pub fn reset(&self) {
        let active = {
            let mut inner = self.inner.borrow_mut();
            inner.handler = None;
            inner.state = AlertState::default();
            inner.active.take()
        };
        drop(active);
    }
}
