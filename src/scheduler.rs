//! Delayed payloads on the frame clock.
//!
//! Nothing here touches wall time: a task becomes due once the summed `delta`
//! passed to [`Scheduler::advance`] reaches its delay.

use slotmap::{new_key_type, SlotMap};
use tracing::trace;

new_key_type! {
	/// Handle for cancelling a scheduled task. Stale handles never match newer tasks.
	pub struct TaskId;
}

#[derive(Debug)]
struct Task<T> {
	remaining: f32,
	payload: T,
}

#[derive(Debug)]
pub struct Scheduler<T> {
	tasks: SlotMap<TaskId, Task<T>>,
}
impl<T> Default for Scheduler<T> {
	fn default() -> Self {
		Scheduler {
			tasks: SlotMap::with_key(),
		}
	}
}
impl<T> Scheduler<T> {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn schedule_after(&mut self, delay: f32, payload: T) -> TaskId {
		self.tasks.insert(Task {
			remaining: delay.max(0.0),
			payload,
		})
	}
	/// Cancel a pending task, handing back its payload if it hadn't fired yet.
	pub fn cancel(&mut self, id: TaskId) -> Option<T> {
		self.tasks.remove(id).map(|t| t.payload)
	}
	pub fn is_pending(&self, id: TaskId) -> bool {
		self.tasks.contains_key(id)
	}

	/// Move the clock forward, returning the payloads that became due, earliest first.
	pub fn advance(&mut self, delta: f32) -> Vec<T> {
		let mut due = Vec::new();
		for (id, task) in self.tasks.iter_mut() {
			task.remaining -= delta;
			if task.remaining <= 0.0 {
				due.push((task.remaining, id));
			}
		}
		due.sort_by(|a, b| a.0.total_cmp(&b.0));
		if !due.is_empty() {
			trace!(count = due.len(), "scheduled tasks due");
		}
		due.into_iter()
			.filter_map(|(_, id)| self.tasks.remove(id))
			.map(|t| t.payload)
			.collect()
	}

	pub fn len(&self) -> usize {
		self.tasks.len()
	}
	pub fn is_empty(&self) -> bool {
		self.tasks.is_empty()
	}
	pub fn clear(&mut self) {
		self.tasks.clear();
	}
}
