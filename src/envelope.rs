use chrono::{DateTime, Utc};
use derive_new::new;
use serde::{Deserialize, Serialize};

use crate::error::InvalidInput;

/// EventBridge event as delivered to the function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, new)]
#[serde(rename_all = "kebab-case")]
pub struct EventEnvelope<T> {
    #[new(default)]
    pub version: Option<String>,
    #[new(default)]
    pub id: Option<String>,
    #[new(default)]
    pub detail_type: Option<String>,
    #[new(default)]
    pub source: Option<String>,
    #[new(default)]
    pub account: Option<String>,
    #[new(default)]
    pub time: Option<DateTime<Utc>>,
    #[new(default)]
    pub region: Option<String>,
    #[new(default)]
    #[serde(default)]
    pub resources: Vec<String>,
    pub detail: Option<T>,
}

impl<T> EventEnvelope<T> {
    pub fn into_detail(self) -> Result<T, InvalidInput> {
        self.detail.ok_or(InvalidInput::MissingDetail)
    }
}
