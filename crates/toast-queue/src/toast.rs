//! Toast values and identifiers
//!
//! Defines the [`Toast`] value that callers enqueue and the presentation
//! layer renders, together with its process-unique identifier. Toasts are
//! plain data: the queue schedules them, the renderer draws them.

use serde::{Deserialize, Deserializer, Serialize};

/// Unique identifier for a toast
///
/// Identifiers are drawn from a process-wide counter, so every id produced
/// with [`ToastId::new`] is distinct for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToastId(u64);

impl ToastId {
    /// Allocate the next unique identifier
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ToastId {
    fn default() -> Self {
        Self::new()
    }
}

/// A transient notification to display to the user
///
/// A `Toast` is an immutable value. The queue never mutates one in place:
/// progress updates are published as fresh values carrying the same
/// [`ToastId`], built with [`Toast::with_progress`].
///
/// Serialized with camelCase field names for the renderer boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Toast {
    id: ToastId,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<String>,
    #[serde(default, deserialize_with = "clamped_progress")]
    progress: f64,
    #[serde(default)]
    show_progress: bool,
}

impl Toast {
    /// Create a toast with a fresh id and the given message
    ///
    /// The toast starts with no icon, zero progress, and the fixed-timeout
    /// display strategy.
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_id(ToastId::new(), message)
    }

    /// Create a toast with an explicit id
    pub fn with_id(id: ToastId, message: impl Into<String>) -> Self {
        Self {
            id,
            message: message.into(),
            icon: None,
            progress: 0.0,
            show_progress: false,
        }
    }

    /// Set the icon token displayed alongside the message
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the progress value, clamped to `[0.0, 1.0]`
    ///
    /// Also used by the queue to publish tick updates, so the returned value
    /// keeps the same id.
    pub fn with_progress(mut self, progress: f64) -> Self {
        self.progress = progress.clamp(0.0, 1.0);
        self
    }

    /// Choose between the two display strategies
    ///
    /// `true` selects the progress strategy: the queue accumulates progress
    /// in fixed ticks and dismisses the toast when it reaches 1. `false`
    /// (the default) selects a single fixed dismiss timeout.
    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Identifier of this toast
    pub fn id(&self) -> ToastId {
        self.id
    }

    /// Display text
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Icon token, if any
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Current progress in `[0.0, 1.0]`
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Whether this toast uses the progress display strategy
    pub fn shows_progress(&self) -> bool {
        self.show_progress
    }
}

fn clamped_progress<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    Ok(value.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_ids_are_unique() {
        let a = ToastId::new();
        let b = ToastId::new();
        let c = ToastId::new();
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn test_new_toast_defaults() {
        let toast = Toast::new("Saved");
        assert_eq!(toast.message(), "Saved");
        assert_eq!(toast.icon(), None);
        assert_eq!(toast.progress(), 0.0);
        assert!(!toast.shows_progress());
    }

    #[test]
    fn test_builder_sets_icon_and_strategy() {
        let toast = Toast::new("Uploading")
            .with_icon("arrow.up.circle")
            .show_progress(true);
        assert_eq!(toast.icon(), Some("arrow.up.circle"));
        assert!(toast.shows_progress());
    }

    #[test]
    fn test_with_progress_clamps() {
        assert_eq!(Toast::new("a").with_progress(1.7).progress(), 1.0);
        assert_eq!(Toast::new("b").with_progress(-0.3).progress(), 0.0);
        assert_eq!(Toast::new("c").with_progress(0.42).progress(), 0.42);
    }

    #[test]
    fn test_with_progress_keeps_id() {
        let toast = Toast::new("Exporting").show_progress(true);
        let id = toast.id();
        let updated = toast.with_progress(0.5);
        assert_eq!(updated.id(), id);
    }

    #[test]
    fn test_serializes_with_camel_case_fields() {
        let toast = Toast::with_id(ToastId::new(), "Done").with_progress(0.25);
        let json = serde_json::to_value(&toast).unwrap();
        assert_eq!(json["message"], "Done");
        assert_eq!(json["progress"], 0.25);
        assert_eq!(json["showProgress"], false);
        assert!(json.get("icon").is_none());
    }

    #[test]
    fn test_deserialize_clamps_progress() {
        let json = r#"{"id":7,"message":"Syncing","progress":3.5,"showProgress":true}"#;
        let toast: Toast = serde_json::from_str(json).unwrap();
        assert_eq!(toast.progress(), 1.0);
        assert!(toast.shows_progress());
    }
}
