use std::fmt;
use std::rc::Rc;

/// Auto-dismiss delay used when the caller does not pass one.
pub const DEFAULT_TIMEOUT_MS: u32 = 5000;

pub type AlertCallback = Rc<dyn Fn()>;

/// Visual severity of the alert dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlertVariant {
    #[default]
    Default,
    Success,
    Error,
}

impl AlertVariant {
    /// Used for the CSS modifier class.
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertVariant::Default => "default",
            AlertVariant::Success => "success",
            AlertVariant::Error => "error",
        }
    }
}

/// Snapshot pushed to the display handler.
///
/// Plain data only: callbacks stay inside the manager, the dialog reaches
/// them through `dismiss` / `run_action`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AlertState {
    pub open: bool,
    pub title: String,
    pub description: Option<String>,
    pub variant: AlertVariant,
    pub timeout_ms: u32,
    pub action_label: Option<String>,
}

/// Extra button rendered next to "close".
#[derive(Clone)]
pub struct AlertAction {
    pub label: String,
    pub on_click: AlertCallback,
}

impl AlertAction {
    pub fn new(label: impl Into<String>, on_click: impl Fn() + 'static) -> Self {
        Self {
            label: label.into(),
            on_click: Rc::new(on_click),
        }
    }
}

impl fmt::Debug for AlertAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlertAction")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Per-alert settings. `timeout_ms: Some(0)` disables auto-dismiss.
#[derive(Clone, Default)]
pub struct AlertOptions {
    pub timeout_ms: Option<u32>,
    pub on_dismiss: Option<AlertCallback>,
    pub action: Option<AlertAction>,
}

impl AlertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timeout_ms(mut self, ms: u32) -> Self {
        self.timeout_ms = Some(ms);
        self
    }

    /// Keep the alert open until the user closes it.
    pub fn sticky(self) -> Self {
        self.timeout_ms(0)
    }

    pub fn on_dismiss(mut self, f: impl Fn() + 'static) -> Self {
        self.on_dismiss = Some(Rc::new(f));
        self
    }

    pub fn action(mut self, label: impl Into<String>, on_click: impl Fn() + 'static) -> Self {
        self.action = Some(AlertAction::new(label, on_click));
        self
    }
}

impl fmt::Debug for AlertOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlertOptions")
            .field("timeout_ms", &self.timeout_ms)
            .field("on_dismiss", &self.on_dismiss.is_some())
            .field("action", &self.action)
            .finish()
    }
}

/// Everything after the title: an optional description and options.
///
/// Built from a description (`"Saved"`), from options alone
/// (`AlertOptions::new().sticky()`), from both (`("Saved", options)`), or
/// from `()` when there is nothing but a title.
#[derive(Debug, Clone, Default)]
pub struct AlertContent {
    pub description: Option<String>,
    pub options: AlertOptions,
}

impl From<()> for AlertContent {
    fn from(_: ()) -> Self {
        Self::default()
    }
}

impl From<&str> for AlertContent {
    fn from(description: &str) -> Self {
        Self::from(description.to_string())
    }
}

impl From<String> for AlertContent {
    fn from(description: String) -> Self {
        Self {
            description: Some(description),
            options: AlertOptions::default(),
        }
    }
}

impl From<AlertOptions> for AlertContent {
    fn from(options: AlertOptions) -> Self {
        Self {
            description: None,
            options,
        }
    }
}

impl<D: Into<String>> From<(D, AlertOptions)> for AlertContent {
    fn from((description, options): (D, AlertOptions)) -> Self {
        Self {
            description: Some(description.into()),
            options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_overloads() {
        let c: AlertContent = "desc".into();
        assert_eq!(c.description.as_deref(), Some("desc"));
        assert_eq!(c.options.timeout_ms, None);

        let c: AlertContent = AlertOptions::new().timeout_ms(100).into();
        assert_eq!(c.description, None);
        assert_eq!(c.options.timeout_ms, Some(100));

        let c: AlertContent = ("desc", AlertOptions::new().sticky()).into();
        assert_eq!(c.description.as_deref(), Some("desc"));
        assert_eq!(c.options.timeout_ms, Some(0));

        let c: AlertContent = ().into();
        assert_eq!(c.description, None);
        assert!(c.options.action.is_none());
    }

    #[test]
    fn test_variant_class() {
        assert_eq!(AlertVariant::default().as_str(), "default");
        assert_eq!(AlertVariant::Error.as_str(), "error");
    }
}
