//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod role;
pub mod duration;
pub mod report;
pub mod event;

// Re-export commonly used models
pub use role::Role;
pub use duration::{MuteDuration, DurationUnit, INVALID_DURATION_MESSAGE};
pub use report::{Report, ReportSummary};
pub use event::{Participant, Mention, MessageContext, CommandKind, CommandEvent, TextMessage, InboundEvent};
