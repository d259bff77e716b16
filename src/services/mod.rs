//! Services module
//!
//! This module contains the moderation core and its outbound collaborators

pub mod gateway;
pub mod moderation;
pub mod notification;
pub mod target;

// Re-export commonly used services
pub use gateway::{ChatGateway, TelegramGateway};
pub use moderation::{EventHandler, ModerationService, ReportPolicy, Escalation};
pub use notification::NotificationService;
pub use target::{resolve_target, ResolvedTarget};
