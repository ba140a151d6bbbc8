use super::{has_focus, has_press, EventSink, Receiver};
use crate::{
	scheduler::{Scheduler, TaskId},
	state::State,
};
use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitionSettings {
	/// Seconds between gaining the condition and firing the on event
	pub on_delay: f32,
	/// Seconds between losing the condition and firing the off event
	pub off_delay: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
	On,
	Off,
}

fn focused(state: &State, _conditions: u32) -> bool {
	has_focus(state)
}

/// Fires on/off events when a condition on the resolved state starts or stops
/// holding, optionally delayed. A transition cancels the opposite pending event.
#[derive(Debug)]
pub struct TransitionReceiver {
	pub settings: TransitionSettings,
	condition: fn(&State, u32) -> bool,
	on: EventSink,
	off: EventSink,
	active: bool,
	scheduler: Scheduler<Edge>,
	pending: Option<TaskId>,
}
impl TransitionReceiver {
	pub fn new(
		condition: fn(&State, u32) -> bool,
		settings: TransitionSettings,
		on: EventSink,
		off: EventSink,
	) -> Self {
		TransitionReceiver {
			settings,
			condition,
			on,
			off,
			active: false,
			scheduler: Scheduler::new(),
			pending: None,
		}
	}
	/// Focus on/off. Pressing keeps focus.
	pub fn focus(settings: TransitionSettings, on: EventSink, off: EventSink) -> Self {
		Self::new(focused, settings, on, off)
	}
	/// Press on/off, only while focused.
	pub fn press(settings: TransitionSettings, on: EventSink, off: EventSink) -> Self {
		Self::new(has_press, settings, on, off)
	}

	pub fn active(&self) -> bool {
		self.active
	}
	pub fn has_pending(&self) -> bool {
		self.pending.is_some()
	}

	fn fire(&mut self, edge: Edge) {
		trace!(?edge, "transition receiver firing");
		match edge {
			Edge::On => self.on.fire(),
			Edge::Off => self.off.fire(),
		}
	}
}
impl Receiver for TransitionReceiver {
	fn on_update(&mut self, state: &State, conditions: u32, delta: f32) {
		for edge in self.scheduler.advance(delta) {
			self.pending = None;
			self.fire(edge);
		}

		let active = (self.condition)(state, conditions);
		if active == self.active {
			return;
		}
		self.active = active;

		if let Some(pending) = self.pending.take() {
			self.scheduler.cancel(pending);
		}
		let (edge, delay) = if active {
			(Edge::On, self.settings.on_delay)
		} else {
			(Edge::Off, self.settings.off_delay)
		};
		if delay > 0.0 {
			self.pending = Some(self.scheduler.schedule_after(delay, edge));
		} else {
			self.fire(edge);
		}
	}
}
