use std::time::Duration;

/// How long a notification stays visible.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(8);

pub type NotificationId = u64;

/// Presentation styling of a notification; it never affects control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Danger,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(Severity::Success, text)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(Severity::Info, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(Severity::Warning, text)
    }

    pub fn danger(text: impl Into<String>) -> Self {
        Self::new(Severity::Danger, text)
    }
}

/// Single-slot notification display. Showing a message replaces the current one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotificationCenter {
    current: Option<(NotificationId, Notification)>,
    next_id: NotificationId,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces whatever is visible and returns the id the expiry timer must carry.
    pub fn show(&mut self, notification: Notification) -> NotificationId {
        self.next_id += 1;
        let id = self.next_id;
        self.current = Some((id, notification));
        id
    }

    /// Returns true if something was visible.
    pub fn clear(&mut self) -> bool {
        self.current.take().is_some()
    }

    /// Clears the notification only if `id` is still the visible one.
    pub fn expire(&mut self, id: NotificationId) -> bool {
        match self.current {
            Some((current_id, _)) if current_id == id => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn current(&self) -> Option<(NotificationId, &Notification)> {
        self.current
            .as_ref()
            .map(|(id, notification)| (*id, notification))
    }
}
