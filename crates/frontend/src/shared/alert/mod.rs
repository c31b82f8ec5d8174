//! App-wide alert dialog.
//!
//! One [`AlertManager`] lives per UI thread. Mount [`AlertProvider`] once at
//! the root; anything else calls [`success`], [`error`] or [`info`]:
//!
//! ```ignore
//! alert::success("Perfil salvo", ());
//! alert::error("Falha ao salvar", ("Tente novamente", AlertOptions::new().sticky()));
//! ```

mod manager;
mod provider;
mod state;
mod timer;

pub use manager::{AlertManager, DisplayHandler};
pub use provider::AlertProvider;
pub use state::{
    AlertAction, AlertCallback, AlertContent, AlertOptions, AlertState, AlertVariant,
    DEFAULT_TIMEOUT_MS,
};
pub use timer::{AlertTimer, BrowserTimer, ManualTimer, TimerHandle};

use std::cell::RefCell;

thread_local! {
    static GLOBAL: RefCell<Option<AlertManager>> = const { RefCell::new(None) };
}

/// The thread's manager, created with [`BrowserTimer`] on first use.
pub fn manager() -> AlertManager {
    GLOBAL.with(|g| {
        g.borrow_mut()
            .get_or_insert_with(|| AlertManager::new(BrowserTimer))
            .clone()
    })
}

/// Install `manager` as the thread's manager, resetting any previous one.
pub fn init(manager: AlertManager) {
    let previous = GLOBAL.with(|g| g.borrow_mut().replace(manager));
    if let Some(previous) = previous {
        previous.reset();
    }
}

/// Drop the thread's manager and everything it holds.
pub fn reset() {
    let previous = GLOBAL.with(|g| g.borrow_mut().take());
    if let Some(previous) = previous {
        previous.reset();
    }
}

pub fn register_display_handler(handler: impl Fn(AlertState) + 'static) {
    manager().register_display_handler(handler);
}

pub fn unregister_display_handler() {
    manager().unregister_display_handler();
}

pub fn success(title: impl Into<String>, content: impl Into<AlertContent>) {
    manager().success(title, content);
}

pub fn error(title: impl Into<String>, content: impl Into<AlertContent>) {
    manager().error(title, content);
}

pub fn info(title: impl Into<String>, content: impl Into<AlertContent>) {
    manager().info(title, content);
}

pub fn dismiss() -> bool {
    manager().dismiss()
}

pub fn run_action() -> bool {
    manager().run_action()
}

pub fn current() -> AlertState {
    manager().current()
}
