use super::{has_press, EventSink, Receiver};
use crate::state::{DefaultState, State};

/// Fires when a press is released back into focus within `click_time` seconds.
#[derive(Debug)]
pub struct ClickReceiver {
	pub click_time: f32,
	sink: EventSink,
	has_down: bool,
	press_time: f32,
}
impl ClickReceiver {
	pub fn new(click_time: f32, sink: EventSink) -> Self {
		ClickReceiver {
			click_time,
			sink,
			has_down: false,
			press_time: 0.0,
		}
	}

	/// How long the current press has lasted
	pub fn press_time(&self) -> f32 {
		self.press_time
	}
}
impl Receiver for ClickReceiver {
	fn on_update(&mut self, state: &State, conditions: u32, delta: f32) {
		if has_press(state, conditions) {
			self.has_down = true;
			self.press_time += delta;
			return;
		}

		if self.has_down && DefaultState::Focus.is(state) && self.press_time < self.click_time {
			self.sink.fire();
		}
		self.has_down = false;
		self.press_time = 0.0;
	}
}
