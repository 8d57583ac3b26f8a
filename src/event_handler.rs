#[cfg(test)]
use mockall::automock;

use crate::notification::Notificator;

/// Business-specific side of the invocation template. Implement one per
/// event type; `EventBridgeHandler` drives the hooks in a fixed order.
#[allow(async_fn_in_trait)]
#[cfg_attr(test, automock(type Detail = crate::order_processor::OrderDetail;))]
pub trait EventHandler {
    type Detail;

    /// Performs the business action. Recoverable conditions go into
    /// `notificator`; anything else is returned as an error.
    async fn call_service_method(
        &self,
        detail: Self::Detail,
        notificator: &mut Notificator,
    ) -> anyhow::Result<()>;

    /// Called when the business action recorded no notifications.
    async fn on_success(&self) -> anyhow::Result<()>;

    /// Called with the full recorded set when the business action recorded
    /// at least one notification. An error here escalates to `on_error`.
    async fn on_failure_with_notifications(
        &self,
        notificator: &Notificator,
    ) -> anyhow::Result<()>;

    /// Called once with any error raised by the other hooks. The error is
    /// propagated to the caller afterwards whatever this returns.
    async fn on_error(&self, error: &anyhow::Error) -> anyhow::Result<()>;
}
