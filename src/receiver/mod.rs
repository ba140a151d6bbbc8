mod click;
pub use click::*;
mod hold;
pub use hold::*;
mod transition;
pub use transition::*;

use crate::{
	error::{ConfigError, Result},
	state::{DefaultState, State},
};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};
use tokio::sync::mpsc::UnboundedSender;

/// Turns the resolved state stream into discrete events.
pub trait Receiver {
	/// Called once per frame after state resolution, with the condition mask
	/// the state was resolved from.
	fn on_update(&mut self, state: &State, conditions: u32, delta: f32);
}

/// Focused, or pressed which implies focus.
pub fn has_focus(state: &State) -> bool {
	DefaultState::Focus.is(state) || DefaultState::Press.is(state)
}
/// Pressed while the focus condition holds.
pub fn has_press(state: &State, conditions: u32) -> bool {
	DefaultState::Press.is(state) && conditions & DefaultState::Focus.bit() != 0
}

/// Emitted by receivers built from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InteractableEvent {
	pub name: String,
}
impl InteractableEvent {
	pub fn new(name: impl Into<String>) -> Self {
		InteractableEvent { name: name.into() }
	}
}

pub type EventSender = UnboundedSender<InteractableEvent>;

/// Where a receiver's event goes. An empty sink does nothing.
#[derive(Default)]
pub struct EventSink(Option<Box<dyn FnMut()>>);
impl EventSink {
	pub fn new(callback: impl FnMut() + 'static) -> Self {
		EventSink(Some(Box::new(callback)))
	}
	pub fn none() -> Self {
		EventSink(None)
	}
	/// Send a copy of `event` down the channel every time this fires.
	pub fn channel<E: Clone + 'static>(sender: UnboundedSender<E>, event: E) -> Self {
		EventSink::new(move || {
			let _ = sender.send(event.clone());
		})
	}
	pub fn is_connected(&self) -> bool {
		self.0.is_some()
	}
	pub fn fire(&mut self) {
		if let Some(callback) = &mut self.0 {
			callback();
		}
	}
}
impl Debug for EventSink {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("EventSink")
			.field(&self.is_connected())
			.finish()
	}
}

fn default_click_time() -> f32 {
	0.5
}
fn default_hold_time() -> f32 {
	1.0
}

/// Serializable receiver description, keyed by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReceiverConfig {
	Click {
		#[serde(default = "default_click_time")]
		click_time: f32,
		event: String,
	},
	Hold {
		#[serde(default = "default_hold_time")]
		hold_time: f32,
		event: String,
	},
	Focus {
		#[serde(default)]
		on_delay: f32,
		#[serde(default)]
		off_delay: f32,
		#[serde(default)]
		on_event: Option<String>,
		#[serde(default)]
		off_event: Option<String>,
	},
	Press {
		#[serde(default)]
		on_delay: f32,
		#[serde(default)]
		off_delay: f32,
		#[serde(default)]
		on_event: Option<String>,
		#[serde(default)]
		off_event: Option<String>,
	},
	Custom {
		kind: String,
		#[serde(default)]
		params: serde_json::Value,
	},
}
impl ReceiverConfig {
	/// Registry key
	pub fn kind(&self) -> &str {
		match self {
			ReceiverConfig::Click { .. } => "click",
			ReceiverConfig::Hold { .. } => "hold",
			ReceiverConfig::Focus { .. } => "focus",
			ReceiverConfig::Press { .. } => "press",
			ReceiverConfig::Custom { kind, .. } => kind,
		}
	}
}

/// Builds a receiver from its config, sending its events through `sender`.
pub type ReceiverFactory = fn(&ReceiverConfig, &EventSender) -> Result<Box<dyn Receiver>>;

fn sink(sender: &EventSender, event: Option<&String>) -> EventSink {
	match event {
		Some(name) => EventSink::channel(sender.clone(), InteractableEvent::new(name)),
		None => EventSink::none(),
	}
}
fn invalid(config: &ReceiverConfig) -> ConfigError {
	ConfigError::InvalidReceiver {
		kind: config.kind().to_string(),
		reason: "configuration does not match the registered factory".to_string(),
	}
}

fn click_factory(config: &ReceiverConfig, sender: &EventSender) -> Result<Box<dyn Receiver>> {
	let ReceiverConfig::Click { click_time, event } = config else {
		return Err(invalid(config));
	};
	Ok(Box::new(ClickReceiver::new(
		*click_time,
		sink(sender, Some(event)),
	)))
}
fn hold_factory(config: &ReceiverConfig, sender: &EventSender) -> Result<Box<dyn Receiver>> {
	let ReceiverConfig::Hold { hold_time, event } = config else {
		return Err(invalid(config));
	};
	Ok(Box::new(HoldReceiver::new(
		*hold_time,
		sink(sender, Some(event)),
	)))
}
fn focus_factory(config: &ReceiverConfig, sender: &EventSender) -> Result<Box<dyn Receiver>> {
	let ReceiverConfig::Focus {
		on_delay,
		off_delay,
		on_event,
		off_event,
	} = config
	else {
		return Err(invalid(config));
	};
	Ok(Box::new(TransitionReceiver::focus(
		TransitionSettings {
			on_delay: *on_delay,
			off_delay: *off_delay,
		},
		sink(sender, on_event.as_ref()),
		sink(sender, off_event.as_ref()),
	)))
}
fn press_factory(config: &ReceiverConfig, sender: &EventSender) -> Result<Box<dyn Receiver>> {
	let ReceiverConfig::Press {
		on_delay,
		off_delay,
		on_event,
		off_event,
	} = config
	else {
		return Err(invalid(config));
	};
	Ok(Box::new(TransitionReceiver::press(
		TransitionSettings {
			on_delay: *on_delay,
			off_delay: *off_delay,
		},
		sink(sender, on_event.as_ref()),
		sink(sender, off_event.as_ref()),
	)))
}

/// Receiver factories by kind. Built once and passed to whatever needs it.
#[derive(Clone)]
pub struct ReceiverRegistry {
	factories: FxHashMap<String, ReceiverFactory>,
}
impl ReceiverRegistry {
	pub fn empty() -> Self {
		ReceiverRegistry {
			factories: FxHashMap::default(),
		}
	}
	pub fn with_defaults() -> Self {
		let mut registry = ReceiverRegistry::empty();
		registry.register("click", click_factory);
		registry.register("hold", hold_factory);
		registry.register("focus", focus_factory);
		registry.register("press", press_factory);
		registry
	}

	pub fn register(&mut self, kind: impl Into<String>, factory: ReceiverFactory) {
		self.factories.insert(kind.into(), factory);
	}
	pub fn kinds(&self) -> Vec<&str> {
		let mut kinds: Vec<&str> = self.factories.keys().map(String::as_str).collect();
		kinds.sort_unstable();
		kinds
	}
	pub fn create(
		&self,
		config: &ReceiverConfig,
		sender: &EventSender,
	) -> Result<Box<dyn Receiver>> {
		let factory = self
			.factories
			.get(config.kind())
			.ok_or_else(|| ConfigError::UnknownReceiver(config.kind().to_string()))?;
		factory(config, sender)
	}
}
impl Default for ReceiverRegistry {
	fn default() -> Self {
		ReceiverRegistry::with_defaults()
	}
}
