use std::{sync::Arc, time::Duration};

use tokio::{task::JoinHandle, time::Instant};
use tracing::debug;

use crate::Navigator;

/// Fires one navigation after a delay. Dropping the handle cancels it.
#[derive(Debug)]
pub struct ScheduledNavigation {
    path: String,
    task: JoinHandle<()>,
}

impl ScheduledNavigation {
    pub fn spawn(navigator: Arc<dyn Navigator>, path: impl Into<String>, delay: Duration) -> Self {
        let path = path.into();
        let target = path.clone();
        let deadline = Instant::now() + delay;
        let task = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            navigator.navigate_to(&target);
        });
        Self { path, task }
    }

    pub fn is_pending(&self) -> bool {
        !self.task.is_finished()
    }

    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for ScheduledNavigation {
    fn drop(&mut self) {
        if !self.task.is_finished() {
            debug!(path = %self.path, "cancelling scheduled navigation");
            self.task.abort();
        }
    }
}
