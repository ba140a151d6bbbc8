use super::{has_press, EventSink, Receiver};
use crate::state::State;

/// Fires once when a press has lasted `hold_time` seconds.
#[derive(Debug)]
pub struct HoldReceiver {
	pub hold_time: f32,
	sink: EventSink,
	press_time: f32,
	fired: bool,
}
impl HoldReceiver {
	pub fn new(hold_time: f32, sink: EventSink) -> Self {
		HoldReceiver {
			hold_time,
			sink,
			press_time: 0.0,
			fired: false,
		}
	}
}
impl Receiver for HoldReceiver {
	fn on_update(&mut self, state: &State, conditions: u32, delta: f32) {
		if !has_press(state, conditions) {
			self.press_time = 0.0;
			self.fired = false;
			return;
		}

		self.press_time += delta;
		if !self.fired && self.press_time >= self.hold_time {
			self.fired = true;
			self.sink.fire();
		}
	}
}
