//! # Frame Scheduler
//!
//! "Wait N frames, then look again." Tasks are plain data; the owner
//! advances the scheduler once per host frame and runs whatever came due.
//!
//! There is no cancellation. A task that fires after the world moved on is
//! expected to re-read live state and do nothing.

/// A debounced exit check, resolved against the popup stack when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredCheck {
    /// The pointer left a hover-wired icon.
    IconExit {
        /// Popups opened so far when the exit happened.
        opened: u64,
    },
    /// The pointer left the popup at `index`.
    PopupExit {
        /// Stack index of the exited popup.
        index: usize,
        /// Popups opened so far when the exit happened.
        opened: u64,
    },
}

#[derive(Debug)]
struct Scheduled<T> {
    due: u64,
    task: T,
}

/// Counts host frames and releases tasks once their delay has elapsed.
#[derive(Debug)]
pub struct FrameScheduler<T> {
    frame: u64,
    pending: Vec<Scheduled<T>>,
}

impl<T> FrameScheduler<T> {
    /// Creates an idle scheduler at frame 0.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frame: 0,
            pending: Vec::with_capacity(8),
        }
    }

    /// Queues `task` to come due `frames` frames from now.
    pub fn schedule(&mut self, frames: u32, task: T) {
        let due = self.frame + u64::from(frames);
        self.pending.push(Scheduled { due, task });
    }

    /// Moves to the next frame and returns every task now due, in the order
    /// they were scheduled.
    pub fn advance(&mut self) -> Vec<T> {
        self.frame += 1;
        if self.pending.is_empty() {
            return Vec::new();
        }

        let frame = self.frame;
        let (due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|s| s.due <= frame);
        self.pending = waiting;

        if !due.is_empty() {
            tracing::trace!(frame, count = due.len(), "deferred tasks due");
        }
        due.into_iter().map(|s| s.task).collect()
    }

    /// Drops every pending task.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Number of tasks still waiting.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Frames advanced so far.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

impl<T> Default for FrameScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_fires_after_delay() {
        let mut scheduler = FrameScheduler::new();
        scheduler.schedule(3, "check");

        assert!(scheduler.advance().is_empty());
        assert!(scheduler.advance().is_empty());
        assert_eq!(scheduler.advance(), vec!["check"]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_zero_delay_fires_next_frame() {
        let mut scheduler = FrameScheduler::new();
        scheduler.schedule(0, 1);
        assert_eq!(scheduler.advance(), vec![1]);
    }

    #[test]
    fn test_due_tasks_keep_schedule_order() {
        let mut scheduler = FrameScheduler::new();
        scheduler.schedule(2, 'a');
        scheduler.advance();
        scheduler.schedule(1, 'b');
        scheduler.schedule(5, 'c');

        assert_eq!(scheduler.advance(), vec!['a', 'b']);
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn test_clear_drops_pending() {
        let mut scheduler = FrameScheduler::new();
        scheduler.schedule(1, ());
        scheduler.clear();
        assert!(scheduler.advance().is_empty());
        assert_eq!(scheduler.frame(), 1);
    }
}
