use chrono::Utc;
use derive_new::new;
use tracing::{Instrument, error, info, info_span, warn};

use crate::config::Config;
use crate::context::InvocationContext;
use crate::envelope::EventEnvelope;
use crate::error::{DeadlineExceeded, HandlerError, InvalidInput};
use crate::event_handler::EventHandler;
use crate::notification::{NotificationScope, Notificator};

/// Runs one EventBridge event through an [`EventHandler`]:
/// validate, execute, pick the success or notification branch, report
/// errors through `on_error`, and always clear the notifications.
#[derive(new)]
pub struct EventBridgeHandler<H: EventHandler> {
    handler: H,
    config: Config,
}

impl<H: EventHandler> EventBridgeHandler<H> {
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Handles one event with a notificator scoped to this invocation.
    pub async fn handle(
        &self,
        envelope: Option<EventEnvelope<H::Detail>>,
        context: &InvocationContext,
    ) -> Result<(), HandlerError> {
        let mut notificator = Notificator::default();

        self.handle_with(envelope, context, &mut notificator).await
    }

    /// Same as [`handle`](Self::handle) with a caller-supplied notificator.
    /// The notificator is empty again once this returns, unless the input
    /// was rejected before execution.
    pub async fn handle_with(
        &self,
        envelope: Option<EventEnvelope<H::Detail>>,
        context: &InvocationContext,
        notificator: &mut Notificator,
    ) -> Result<(), HandlerError> {
        let span = info_span!(
            "invocation",
            request_id = %context.request_id,
            detail_type = envelope.as_ref().and_then(|e| e.detail_type.as_deref()),
            source = envelope.as_ref().and_then(|e| e.source.as_deref()),
            event_id = envelope.as_ref().and_then(|e| e.id.as_deref())
        );

        self.run(envelope, context, notificator)
            .instrument(span)
            .await
    }

    async fn run(
        &self,
        envelope: Option<EventEnvelope<H::Detail>>,
        context: &InvocationContext,
        notificator: &mut Notificator,
    ) -> Result<(), HandlerError> {
        info!("Starting method");

        let detail = match validate(envelope) {
            Ok(detail) => detail,
            Err(invalid) => {
                warn!(%invalid, "Request or detail is null");
                return Err(invalid.into());
            }
        };

        let mut scope = NotificationScope::acquire(notificator);

        let result = match self.execute(detail, context, &mut scope).await {
            Ok(()) => Ok(()),
            Err(error) => Err(self.report_error(error).await),
        };

        drop(scope);
        info!(succeeded = result.is_ok(), "End of the process");

        result
    }

    async fn execute(
        &self,
        detail: H::Detail,
        context: &InvocationContext,
        notificator: &mut Notificator,
    ) -> anyhow::Result<()> {
        info!("Starting service method");
        self.call_service_method(detail, context, notificator).await?;
        info!("Service method is done");

        if notificator.has_notification() {
            info!(
                count = notificator.len(),
                "Starting on failure with notifications method"
            );
            self.handler
                .on_failure_with_notifications(notificator)
                .await?;
            info!("On failure with notifications completed");
        } else {
            info!("Starting on success method");
            self.handler.on_success().await?;
            info!("On success completed");
        }

        Ok(())
    }

    async fn call_service_method(
        &self,
        detail: H::Detail,
        context: &InvocationContext,
        notificator: &mut Notificator,
    ) -> anyhow::Result<()> {
        let budget =
            context.time_budget(self.config.deadline_margin, Utc::now());

        match budget {
            None => {
                self.handler
                    .call_service_method(detail, notificator)
                    .await
            }
            Some(budget) if budget.is_zero() => {
                warn!("No time left before the deadline, skipping service method");
                Err(DeadlineExceeded { budget }.into())
            }
            Some(budget) => {
                let call = self.handler.call_service_method(detail, notificator);

                match tokio::time::timeout(budget, call).await {
                    Ok(result) => result,
                    Err(_) => {
                        warn!(?budget, "Service method abandoned at the deadline");
                        Err(DeadlineExceeded { budget }.into())
                    }
                }
            }
        }
    }

    async fn report_error(&self, error: anyhow::Error) -> HandlerError {
        error!(error = format!("{:?}", error), "An error has occurred");

        let hook_error = match self.handler.on_error(&error).await {
            Ok(()) => None,
            Err(hook_error) => {
                error!(
                    hook_error = format!("{:?}", hook_error),
                    "Error hook failed, surfacing the original error"
                );
                Some(hook_error)
            }
        };

        HandlerError::Execution { error, hook_error }
    }
}

fn validate<T>(envelope: Option<EventEnvelope<T>>) -> Result<T, InvalidInput> {
    envelope.ok_or(InvalidInput::MissingEnvelope)?.into_detail()
}
