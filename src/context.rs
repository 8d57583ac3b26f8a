use std::time::Duration;

use chrono::{DateTime, Utc};
use derive_new::new;

/// Invocation metadata handed to the template alongside the envelope.
#[derive(Debug, Clone, Default, new)]
pub struct InvocationContext {
    pub request_id: String,
    pub function_arn: String,
    pub deadline: Option<DateTime<Utc>>,
}

impl InvocationContext {
    /// Time left for the business call, keeping `margin` in reserve for
    /// the hooks and cleanup. `None` when the invocation has no deadline.
    pub fn time_budget(
        &self,
        margin: Duration,
        now: DateTime<Utc>,
    ) -> Option<Duration> {
        self.deadline.map(|deadline| {
            (deadline - now)
                .to_std()
                .unwrap_or_default()
                .saturating_sub(margin)
        })
    }
}

impl From<lambda_runtime::Context> for InvocationContext {
    fn from(context: lambda_runtime::Context) -> Self {
        // the runtime reports the deadline in epoch millis, 0 when unset
        let deadline = i64::try_from(context.deadline)
            .ok()
            .filter(|&millis| millis > 0)
            .and_then(DateTime::<Utc>::from_timestamp_millis);

        InvocationContext {
            request_id: context.request_id,
            function_arn: context.invoked_function_arn,
            deadline,
        }
    }
}
