//! In-memory notification surface: a FIFO of toasts that expire on their own.

use std::{
    collections::VecDeque,
    sync::{Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use tokio::time::Instant;

use crate::{NotificationKind, Notifier};

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastPosition {
    #[default]
    TopRight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub kind: NotificationKind,
    pub message: String,
    pub shown_at: Instant,
}

#[derive(Default)]
struct ToastQueueState {
    next_id: u64,
    toasts: VecDeque<Toast>,
}

pub struct ToastQueue {
    duration: Duration,
    position: ToastPosition,
    inner: Mutex<ToastQueueState>,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}

impl ToastQueue {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            position: ToastPosition::default(),
            inner: Mutex::new(ToastQueueState::default()),
        }
    }

    pub fn position(&self) -> ToastPosition {
        self.position
    }

    pub fn push(&self, kind: NotificationKind, message: impl Into<String>) -> ToastId {
        let now = Instant::now();
        let mut guard = self.lock();
        self.prune_expired(&mut guard, now);
        let id = ToastId(guard.next_id);
        guard.next_id += 1;
        guard.toasts.push_back(Toast {
            id,
            kind,
            message: message.into(),
            shown_at: now,
        });
        id
    }

    /// Toasts still on screen, oldest first.
    pub fn visible(&self) -> Vec<Toast> {
        let mut guard = self.lock();
        self.prune_expired(&mut guard, Instant::now());
        guard.toasts.iter().cloned().collect()
    }

    pub fn dismiss(&self, id: ToastId) -> bool {
        let mut guard = self.lock();
        let before = guard.toasts.len();
        guard.toasts.retain(|toast| toast.id != id);
        guard.toasts.len() != before
    }

    fn prune_expired(&self, state: &mut ToastQueueState, now: Instant) {
        state
            .toasts
            .retain(|toast| now.duration_since(toast.shown_at) < self.duration);
    }

    fn lock(&self) -> MutexGuard<'_, ToastQueueState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, kind: NotificationKind, message: &str) {
        self.push(kind, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(queue: &ToastQueue) -> Vec<String> {
        queue
            .visible()
            .into_iter()
            .map(|toast| toast.message)
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn toasts_expire_after_configured_duration() {
        let queue = ToastQueue::default();
        queue.notify(NotificationKind::Success, "Account created");

        tokio::time::advance(Duration::from_millis(4999)).await;
        assert_eq!(messages(&queue), vec!["Account created"]);

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(queue.visible().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn keeps_emission_order_and_duplicates() {
        let queue = ToastQueue::new(Duration::from_secs(5));
        queue.notify(NotificationKind::Error, "Signup Error. Try again");
        tokio::time::advance(Duration::from_secs(1)).await;
        queue.notify(NotificationKind::Error, "Signup Error. Try again");
        queue.notify(NotificationKind::Success, "Account created");

        assert_eq!(
            messages(&queue),
            vec![
                "Signup Error. Try again",
                "Signup Error. Try again",
                "Account created"
            ]
        );

        tokio::time::advance(Duration::from_secs(4)).await;
        assert_eq!(
            messages(&queue),
            vec!["Signup Error. Try again", "Account created"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn push_drops_expired_toasts() {
        let queue = ToastQueue::new(Duration::from_secs(5));
        for _ in 0..3 {
            queue.push(NotificationKind::Error, "Signup Error. Try again");
        }
        tokio::time::advance(Duration::from_secs(5)).await;

        queue.push(NotificationKind::Success, "Account created");
        assert_eq!(queue.lock().toasts.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn dismiss_removes_a_single_toast() {
        let queue = ToastQueue::default();
        let first = queue.push(NotificationKind::Error, "first");
        queue.push(NotificationKind::Error, "second");

        assert!(queue.dismiss(first));
        assert!(!queue.dismiss(first));
        assert_eq!(messages(&queue), vec!["second"]);
        assert_eq!(queue.position(), ToastPosition::TopRight);
    }
}
