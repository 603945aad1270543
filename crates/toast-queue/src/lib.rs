//! Headless toast-notification queue for Tokio applications
//!
//! This crate serializes "show a toast" requests from arbitrary callers into
//! a single at-a-time display slot with automatic timing, pause/resume/dismiss
//! controls, and bounded drop-oldest buffering. Rendering is left to an
//! external presentation layer that subscribes to the observable active-toast
//! value.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod event;
pub mod queue;
pub mod toast;

pub use config::QueueConfig;
pub use event::{DismissReason, ToastEvent};
pub use queue::ToastQueue;
pub use toast::{Toast, ToastId};
