//! The toast queue pipeline
//!
//! This module provides the [`ToastQueue`] handle and the worker task behind
//! it. The worker serializes "show a toast" requests into a single display
//! slot: each request waits in a bounded pending buffer, then moves through
//! the phases Queued, Appearing, Active (running or paused), and Dismissed.
//! Callers interact through fire-and-forget commands; the presentation layer
//! observes the active toast through a watch channel.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::time::Instant;

use crate::config::QueueConfig;
use crate::event::{DismissReason, ToastEvent};
use crate::toast::Toast;

/// Commands sent from [`ToastQueue`] handles to the worker task
#[derive(Debug)]
enum Command {
    /// Append a request to the pending buffer
    Add(Toast),
    /// Freeze the active toast's countdown
    Pause,
    /// Resume a paused countdown
    Resume,
    /// End the active toast's display immediately
    Dismiss,
}

/// Handle to a running toast queue
///
/// Cloning the handle is cheap; every clone feeds the same worker task and
/// observes the same active toast. All operations are fire-and-forget: they
/// return immediately and their effect shows up asynchronously through
/// [`subscribe_active`](Self::subscribe_active) and
/// [`subscribe_events`](Self::subscribe_events).
///
/// The worker stops once every handle has been dropped; subscribers then
/// observe channel closure.
///
/// # Example
///
/// ```no_run
/// use toast_queue::ToastQueue;
///
/// #[tokio::main]
/// async fn main() {
///     let queue = ToastQueue::new();
///     let mut active = queue.subscribe_active();
///
///     queue.show("Draft saved");
///
///     // The toast becomes active after the appear delay.
///     active.changed().await.unwrap();
///     assert!(active.borrow().is_some());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ToastQueue {
    /// Command channel into the worker
    commands: mpsc::UnboundedSender<Command>,
    /// Receiver for the active-toast projection
    active: watch::Receiver<Option<Toast>>,
    /// Event broadcaster, shared with the worker
    events: broadcast::Sender<ToastEvent>,
}

impl ToastQueue {
    /// Create a queue with the stock configuration and spawn its worker
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new() -> Self {
        Self::with_config(QueueConfig::default())
    }

    /// Create a queue with the given configuration and spawn its worker
    ///
    /// Must be called from within a Tokio runtime.
    pub fn with_config(config: QueueConfig) -> Self {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (active_tx, active_rx) = watch::channel(None);
        let (events_tx, _) = broadcast::channel(16);

        let worker = Worker::new(config, commands_rx, active_tx, events_tx.clone());
        tokio::spawn(worker.run());

        ToastQueue { commands: commands_tx, active: active_rx, events: events_tx }
    }

    /// Enqueue a plain toast with the given message
    ///
    /// The toast gets a fresh id, no icon, zero progress, and the
    /// fixed-timeout display strategy. Use [`add`](Self::add) with a built
    /// [`Toast`] for the other variants.
    pub fn show(&self, message: impl Into<String>) {
        self.add(Toast::new(message));
    }

    /// Enqueue an already-constructed toast
    ///
    /// Never blocks and never fails. When the pending buffer is full, the
    /// oldest undelivered request is silently dropped to make room.
    pub fn add(&self, toast: Toast) {
        let _ = self.commands.send(Command::Add(toast));
    }

    /// Freeze the active toast's dismissal countdown
    ///
    /// No-op when no toast is active. The appear delay of a not-yet-active
    /// toast is unaffected.
    pub fn pause(&self) {
        let _ = self.commands.send(Command::Pause);
    }

    /// Resume a paused countdown
    ///
    /// No-op when no toast is active or the active toast is not paused. For
    /// the fixed-timeout strategy the full dismiss timeout restarts from the
    /// top; elapsed time before the pause is not credited. The progress
    /// strategy keeps its accumulated progress.
    pub fn resume(&self) {
        let _ = self.commands.send(Command::Resume);
    }

    /// End the active toast's display immediately
    ///
    /// No-op when no toast is active. The next pending request, if any, is
    /// promoted right away.
    pub fn dismiss(&self) {
        let _ = self.commands.send(Command::Dismiss);
    }

    /// Snapshot of the currently active toast
    pub fn active_toast(&self) -> Option<Toast> {
        self.active.borrow().clone()
    }

    /// Subscribe to the active-toast projection
    ///
    /// The receiver starts at the current value (`None` while nothing is
    /// displayed) and observes every promotion, progress update, and
    /// dismissal the watch channel has not coalesced away.
    pub fn subscribe_active(&self) -> watch::Receiver<Option<Toast>> {
        self.active.clone()
    }

    /// Subscribe to the lifecycle event feed
    ///
    /// Unlike the watch projection, the event feed reports every transition:
    /// enqueue, overflow eviction, activation, and dismissal with its reason.
    pub fn subscribe_events(&self) -> broadcast::Receiver<ToastEvent> {
        self.events.subscribe()
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Worker task owning all queue state
///
/// Requests and timers are merged into one serialized stream: commands from
/// the handles, the appear-delay sleep, the fixed dismiss timer, and the
/// progress tick interval all meet in `select!` loops, so no state is ever
/// touched from two places at once.
struct Worker {
    /// Timing and capacity knobs, clamped to usable values
    config: QueueConfig,
    /// Command stream from the handles
    commands: mpsc::UnboundedReceiver<Command>,
    /// Undelivered requests in arrival order
    pending: VecDeque<Toast>,
    /// Publisher for the active-toast projection
    active_tx: watch::Sender<Option<Toast>>,
    /// Publisher for lifecycle events
    events_tx: broadcast::Sender<ToastEvent>,
}

impl Worker {
    fn new(
        mut config: QueueConfig,
        commands: mpsc::UnboundedReceiver<Command>,
        active_tx: watch::Sender<Option<Toast>>,
        events_tx: broadcast::Sender<ToastEvent>,
    ) -> Self {
        // Degenerate values are clamped rather than rejected; the queue has
        // no error channel.
        config.capacity = config.capacity.max(1);
        config.tick_interval = config.tick_interval.max(Duration::from_millis(1));

        Worker { config, commands, pending: VecDeque::new(), active_tx, events_tx }
    }

    /// Run until every handle has been dropped
    async fn run(mut self) {
        loop {
            // Idle: block for the next command, then drain whatever else has
            // already arrived. A burst of adds lands in the pending buffer in
            // full before any of them is taken in flight, which keeps the
            // overflow policy deterministic.
            let Some(command) = self.commands.recv().await else {
                return;
            };
            self.handle_idle_command(command);
            while let Ok(command) = self.commands.try_recv() {
                self.handle_idle_command(command);
            }

            // Promote pending requests one at a time until the buffer is
            // drained, then go idle again.
            while let Some(toast) = self.pending.pop_front() {
                if !self.deliver(toast).await {
                    return;
                }
            }
        }
    }

    /// Apply a command received while no toast is in flight
    fn handle_idle_command(&mut self, command: Command) {
        match command {
            Command::Add(toast) => self.enqueue(toast),
            command => {
                // Controls apply to the currently active toast only; with
                // nothing active they are dropped, not queued.
                tracing::trace!("Ignoring {:?} with no active toast", command);
            }
        }
    }

    /// Append to the pending buffer, evicting the oldest entry on overflow
    fn enqueue(&mut self, toast: Toast) {
        if self.pending.len() >= self.config.capacity {
            if let Some(dropped) = self.pending.pop_front() {
                tracing::debug!("Pending buffer full, dropping oldest toast {:?}", dropped.id());
                let _ = self.events_tx.send(ToastEvent::Dropped(dropped.id()));
            }
        }
        let _ = self.events_tx.send(ToastEvent::Enqueued(toast.id()));
        self.pending.push_back(toast);
    }

    /// Carry one request through the Appearing and Active phases
    ///
    /// Returns `false` when the command channel closed along the way and the
    /// worker should stop. The active-toast projection is `Some` exactly
    /// between the activation and deactivation sends in this function.
    async fn deliver(&mut self, toast: Toast) -> bool {
        if !self.wait_appear().await {
            return false;
        }

        tracing::debug!("Toast {:?} active", toast.id());
        let _ = self.active_tx.send(Some(toast.clone()));
        let _ = self.events_tx.send(ToastEvent::Activated(toast.id()));

        let outcome = if toast.shows_progress() {
            self.countdown_progress(&toast).await
        } else {
            self.countdown_fixed().await
        };

        let _ = self.active_tx.send(None);
        match outcome {
            Some(reason) => {
                tracing::debug!("Toast {:?} dismissed: {:?}", toast.id(), reason);
                let _ = self.events_tx.send(ToastEvent::Dismissed(toast.id(), reason));
                true
            }
            None => false,
        }
    }

    /// Appearing phase: wait the appear delay before display
    ///
    /// The delay is not interruptible. Adds received while waiting are
    /// buffered as usual; control commands concern no active toast and are
    /// dropped. Returns `false` when the command channel closed.
    async fn wait_appear(&mut self) -> bool {
        let delay = tokio::time::sleep(self.config.appear_delay);
        tokio::pin!(delay);

        loop {
            tokio::select! {
                _ = &mut delay => return true,
                command = self.commands.recv() => match command {
                    Some(Command::Add(toast)) => self.enqueue(toast),
                    Some(command) => {
                        tracing::trace!("Ignoring {:?} with no active toast", command);
                    }
                    None => return false,
                },
            }
        }
    }

    /// Active phase, fixed-timeout strategy
    ///
    /// A single timer fires after the dismiss timeout unless interrupted.
    /// Pausing disarms the timer indefinitely; resuming restarts the full
    /// wait (elapsed time before the pause is not credited under this
    /// strategy). Returns the dismissal reason, or `None` when the command
    /// channel closed.
    async fn countdown_fixed(&mut self) -> Option<DismissReason> {
        let timer = tokio::time::sleep(self.config.dismiss_after);
        tokio::pin!(timer);
        let mut paused = false;

        loop {
            tokio::select! {
                _ = &mut timer, if !paused => return Some(DismissReason::TimedOut),
                command = self.commands.recv() => match command {
                    Some(Command::Add(toast)) => self.enqueue(toast),
                    Some(Command::Pause) => paused = true,
                    Some(Command::Resume) => {
                        if paused {
                            paused = false;
                            timer.as_mut().reset(Instant::now() + self.config.dismiss_after);
                        }
                    }
                    Some(Command::Dismiss) => return Some(DismissReason::Requested),
                    None => return None,
                },
            }
        }
    }

    /// Active phase, progress strategy
    ///
    /// A periodic tick accumulates display time while running; ticks keep
    /// firing while paused but contribute nothing. Every effective tick
    /// publishes a fresh toast value with the same id and the accumulated
    /// time normalized against the dismiss timeout. Accumulation starts from
    /// the enqueued progress, so pre-seeded toasts stay monotonic. Returns
    /// the dismissal reason, or `None` when the command channel closed.
    async fn countdown_progress(&mut self, toast: &Toast) -> Option<DismissReason> {
        let total = self.config.dismiss_after;
        let mut elapsed = total.mul_f64(toast.progress());
        let mut current = toast.clone();
        let mut ticks = tokio::time::interval_at(
            Instant::now() + self.config.tick_interval,
            self.config.tick_interval,
        );
        let mut paused = false;

        loop {
            tokio::select! {
                _ = ticks.tick() => {
                    if paused {
                        continue;
                    }
                    elapsed += self.config.tick_interval;
                    current = current.with_progress(elapsed.as_secs_f64() / total.as_secs_f64());
                    let _ = self.active_tx.send(Some(current.clone()));
                    if elapsed >= total {
                        return Some(DismissReason::Completed);
                    }
                }
                command = self.commands.recv() => match command {
                    Some(Command::Add(queued)) => self.enqueue(queued),
                    Some(Command::Pause) => paused = true,
                    Some(Command::Resume) => paused = false,
                    Some(Command::Dismiss) => return Some(DismissReason::Requested),
                    None => return None,
                },
            }
        }
    }
}
