pub mod config;
pub mod context;
pub mod envelope;
pub mod error;
pub mod event_bridge;
pub mod event_handler;
pub mod notification;
pub mod order_processor;

pub use config::Config;
pub use context::InvocationContext;
pub use envelope::EventEnvelope;
pub use error::{DeadlineExceeded, HandlerError, InvalidInput};
pub use event_bridge::EventBridgeHandler;
pub use event_handler::EventHandler;
pub use notification::{Notification, NotificationKind, Notificator};
