//! Queue lifecycle events
//!
//! Events broadcast as requests move through the pipeline. The event feed
//! complements the observable active-toast value: the watch channel coalesces
//! to the latest value, while the event feed reports every transition.

use crate::toast::ToastId;

/// Why an active toast stopped being displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    /// The fixed dismiss timeout elapsed
    TimedOut,
    /// Accumulated progress reached 1
    Completed,
    /// A caller requested dismissal
    Requested,
}

/// Events broadcast as toasts move through the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastEvent {
    /// A request entered the pending buffer
    Enqueued(ToastId),
    /// The oldest undelivered request was evicted to make room
    Dropped(ToastId),
    /// A request was promoted and is now the active toast
    Activated(ToastId),
    /// The active toast stopped being displayed
    Dismissed(ToastId, DismissReason),
}

impl ToastEvent {
    /// Identifier of the toast the event concerns
    pub fn id(&self) -> ToastId {
        match self {
            Self::Enqueued(id) | Self::Dropped(id) | Self::Activated(id) => *id,
            Self::Dismissed(id, _) => *id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_id_accessor() {
        let id = ToastId::new();
        assert_eq!(ToastEvent::Enqueued(id).id(), id);
        assert_eq!(ToastEvent::Dropped(id).id(), id);
        assert_eq!(ToastEvent::Activated(id).id(), id);
        assert_eq!(ToastEvent::Dismissed(id, DismissReason::TimedOut).id(), id);
    }
}
