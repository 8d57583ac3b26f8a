use std::ops::{Deref, DerefMut};

use derive_more::{Constructor, Display};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[display("warning")]
    Warning,
    #[display("error")]
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Constructor)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn warning(message: impl Into<String>) -> Self {
        Notification::new(NotificationKind::Warning, message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notification::new(NotificationKind::Error, message.into())
    }
}

/// Notable but recoverable conditions raised by business logic during one
/// invocation. A fresh instance belongs to each invocation.
#[derive(Debug, Default)]
pub struct Notificator {
    notifications: Vec<Notification>,
}

impl Notificator {
    pub fn add(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    pub fn has_notification(&self) -> bool {
        !self.notifications.is_empty()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    pub fn clear_notifications(&mut self) {
        self.notifications.clear();
    }
}

/// Lends the notificator to one invocation and clears it on every exit,
/// including unwinding and a dropped invocation future.
pub(crate) struct NotificationScope<'a> {
    notificator: &'a mut Notificator,
}

impl<'a> NotificationScope<'a> {
    pub(crate) fn acquire(notificator: &'a mut Notificator) -> Self {
        NotificationScope { notificator }
    }
}

impl Deref for NotificationScope<'_> {
    type Target = Notificator;

    fn deref(&self) -> &Notificator {
        self.notificator
    }
}

impl DerefMut for NotificationScope<'_> {
    fn deref_mut(&mut self) -> &mut Notificator {
        self.notificator
    }
}

impl Drop for NotificationScope<'_> {
    fn drop(&mut self) {
        let cleared = self.notificator.len();
        self.notificator.clear_notifications();
        debug!(cleared, "Notifications cleared");
    }
}

#[cfg(test)]
mod tests {
    use std::panic::AssertUnwindSafe;

    use super::{Notification, NotificationKind, NotificationScope, Notificator};

    #[test]
    fn test_has_notification_follows_entries() {
        let mut notificator = Notificator::default();
        assert!(!notificator.has_notification());

        notificator.add(Notification::warning("slow downstream"));

        assert!(notificator.has_notification());
        assert_eq!(
            notificator.notifications(),
            [Notification::new(
                NotificationKind::Warning,
                "slow downstream".to_string()
            )]
        );
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut notificator = Notificator::default();
        notificator.clear_notifications();
        assert!(notificator.is_empty());

        notificator.add(Notification::error("stock check failed"));
        notificator.clear_notifications();
        notificator.clear_notifications();

        assert!(!notificator.has_notification());
    }

    #[test]
    fn test_scope_clears_on_drop() {
        let mut notificator = Notificator::default();

        {
            let mut scope = NotificationScope::acquire(&mut notificator);
            scope.add(Notification::warning("one"));
            scope.add(Notification::warning("two"));
            assert_eq!(scope.len(), 2);
        }

        assert!(!notificator.has_notification());
    }

    #[test]
    fn test_scope_clears_on_panic() {
        let mut notificator = Notificator::default();

        let result: std::thread::Result<()> =
            std::panic::catch_unwind(AssertUnwindSafe(|| {
                let mut scope = NotificationScope::acquire(&mut notificator);
                scope.add(Notification::warning("before panic"));
                panic!("business logic panicked");
            }));

        assert!(result.is_err());
        assert!(notificator.is_empty());
    }

    #[test]
    fn test_kind_display_and_serde() {
        assert_eq!(NotificationKind::Warning.to_string(), "warning");
        assert_eq!(
            serde_json::to_value(Notification::error("boom")).unwrap(),
            serde_json::json!({ "kind": "error", "message": "boom" })
        );
    }
}
