//! Delayed task scheduler
//!
//! Deferred callbacks that run on the same clock as the animations. Tasks are
//! registered with a delay and come due as the host advances time through
//! [`DelayedTasks::advance`]; nothing runs on its own thread, so tests can
//! step time deterministically.
//!
//! ```ignore
//! let mut tasks = DelayedTasks::new();
//! let id = tasks.schedule(150.0, PressCheck);
//! for due in tasks.advance(16.0) { /* run */ }
//! tasks.cancel(id);
//! ```

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Handle to a scheduled task
    pub struct TaskId;
}

#[derive(Debug)]
struct PendingTask<T> {
    remaining_ms: f32,
    /// Insertion order, breaks ties between tasks due on the same tick
    seq: u64,
    payload: T,
}

/// Cancellable tasks waiting for their delay to elapse
#[derive(Debug)]
pub struct DelayedTasks<T> {
    tasks: SlotMap<TaskId, PendingTask<T>>,
    next_seq: u64,
}

impl<T> DelayedTasks<T> {
    pub fn new() -> Self {
        Self {
            tasks: SlotMap::with_key(),
            next_seq: 0,
        }
    }

    /// Schedule `payload` to come due after `delay_ms` milliseconds
    pub fn schedule(&mut self, delay_ms: f32, payload: T) -> TaskId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let id = self.tasks.insert(PendingTask {
            remaining_ms: delay_ms.max(0.0),
            seq,
            payload,
        });
        tracing::trace!("DelayedTasks: scheduled {:?} in {}ms", id, delay_ms);
        id
    }

    /// Cancel a pending task, returning its payload if it had not run yet
    pub fn cancel(&mut self, id: TaskId) -> Option<T> {
        self.tasks.remove(id).map(|task| task.payload)
    }

    /// Whether a task is still waiting
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.contains_key(id)
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Advance time and take the tasks that came due, earliest first
    pub fn advance(&mut self, dt_ms: f32) -> SmallVec<[(TaskId, T); 2]> {
        let dt_ms = dt_ms.max(0.0);
        let mut due: SmallVec<[(TaskId, f32, u64); 2]> = SmallVec::new();
        for (id, task) in self.tasks.iter_mut() {
            task.remaining_ms -= dt_ms;
            if task.remaining_ms <= 0.0 {
                due.push((id, task.remaining_ms, task.seq));
            }
        }
        due.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.2.cmp(&b.2)));

        due.into_iter()
            .filter_map(|(id, _, _)| self.tasks.remove(id).map(|task| (id, task.payload)))
            .collect()
    }
}

impl<T> Default for DelayedTasks<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_comes_due_after_delay() {
        let mut tasks = DelayedTasks::new();
        let id = tasks.schedule(150.0, "check");

        assert!(tasks.advance(100.0).is_empty());
        assert!(tasks.is_pending(id));

        let due = tasks.advance(50.0);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0], (id, "check"));
        assert!(!tasks.is_pending(id));
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_cancelled_task_never_runs() {
        let mut tasks = DelayedTasks::new();
        let id = tasks.schedule(150.0, 7);
        assert_eq!(tasks.cancel(id), Some(7));
        assert_eq!(tasks.cancel(id), None);
        assert!(tasks.advance(500.0).is_empty());
    }

    #[test]
    fn test_due_tasks_ordered_by_deadline() {
        let mut tasks = DelayedTasks::new();
        tasks.schedule(30.0, "late");
        tasks.schedule(10.0, "early");
        tasks.schedule(10.0, "early-second");

        let due: Vec<_> = tasks.advance(40.0).into_iter().map(|(_, p)| p).collect();
        assert_eq!(due, vec!["early", "early-second", "late"]);
    }

    #[test]
    fn test_zero_delay_runs_on_next_advance() {
        let mut tasks = DelayedTasks::new();
        tasks.schedule(0.0, ());
        assert_eq!(tasks.advance(0.0).len(), 1);
    }
}
