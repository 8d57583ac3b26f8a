use anyhow::bail;
use derive_new::new;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::event_handler::EventHandler;
use crate::notification::{Notification, Notificator};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, new)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    pub order_id: String,
    #[serde(default)]
    pub lines: Vec<OrderLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, new)]
pub struct OrderLine {
    pub sku: String,
    pub quantity: u32,
}

#[derive(Error, Debug)]
pub enum OrderError {
    #[error("Order id is blank")]
    BlankOrderId,
}

/// Accepts placed orders. Suspicious lines are reported as notifications
/// rather than failing the whole order.
#[derive(new)]
pub struct OrderProcessor {
    max_line_quantity: u32,
}

impl OrderProcessor {
    pub fn from_config(config: &Config) -> Self {
        OrderProcessor::new(config.max_line_quantity)
    }

    fn check_line(&self, line: &OrderLine) -> Option<Notification> {
        if line.quantity == 0 {
            Some(Notification::warning(format!(
                "Line {} has zero quantity",
                line.sku
            )))
        } else if line.quantity > self.max_line_quantity {
            Some(Notification::warning(format!(
                "Line {} quantity {} exceeds the limit of {}",
                line.sku, line.quantity, self.max_line_quantity
            )))
        } else {
            None
        }
    }
}

impl EventHandler for OrderProcessor {
    type Detail = OrderDetail;

    async fn call_service_method(
        &self,
        detail: OrderDetail,
        notificator: &mut Notificator,
    ) -> anyhow::Result<()> {
        if detail.order_id.trim().is_empty() {
            bail!(OrderError::BlankOrderId);
        }

        if detail.lines.is_empty() {
            notificator.add(Notification::warning(format!(
                "Order {} has no lines",
                detail.order_id
            )));
        }

        for line in &detail.lines {
            if let Some(notification) = self.check_line(line) {
                notificator.add(notification);
            }
        }

        info!(
            order_id = %detail.order_id,
            lines = detail.lines.len(),
            "Order accepted"
        );

        Ok(())
    }

    async fn on_success(&self) -> anyhow::Result<()> {
        info!("Order processed");
        Ok(())
    }

    async fn on_failure_with_notifications(
        &self,
        notificator: &Notificator,
    ) -> anyhow::Result<()> {
        for notification in notificator.notifications() {
            warn!(
                kind = %notification.kind,
                note = %notification.message,
                "Order processed with notification"
            );
        }
        Ok(())
    }

    async fn on_error(&self, error: &anyhow::Error) -> anyhow::Result<()> {
        error!(error = format!("{:?}", error), "Order processing failed");
        Ok(())
    }
}
