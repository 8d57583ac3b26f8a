use std::time::Duration;

use derive_new::new;

#[derive(Debug, Clone, new)]
pub struct Config {
    /// Reserved before the Lambda deadline for the hooks and cleanup.
    #[new(value = "std::time::Duration::from_millis(500)")]
    pub deadline_margin: Duration,
    #[new(value = "100")]
    pub max_line_quantity: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}
