use crate::{
	error::{ConfigError, Result},
	host::HostResolver,
	receiver::{
		has_focus, has_press, ClickReceiver, EventSink, InteractableEvent, Receiver,
		ReceiverConfig, ReceiverRegistry,
	},
	state::{condition_bits, DefaultState, State, StateCatalogue, StateModel},
	theme::{Theme, ThemeEngine, ThemeRegistry},
};
use serde::{Deserialize, Serialize};
use std::{cell::Cell, rc::Rc};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractableSettings {
	pub enabled: bool,
	/// Number of theme sets a click cycles through. 1 means no toggling.
	pub dimensions: usize,
	/// Longest press that still counts as a toggle click
	pub toggle_click_time: f32,
}
impl Default for InteractableSettings {
	fn default() -> Self {
		Self {
			enabled: true,
			dimensions: 1,
			toggle_click_time: 0.5,
		}
	}
}

/// Themes for one host target, one list per dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
	pub target: String,
	pub themes: Vec<Vec<Theme>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractableConfig {
	#[serde(default)]
	pub states: StateCatalogue,
	#[serde(default)]
	pub settings: InteractableSettings,
	#[serde(default)]
	pub profiles: Vec<Profile>,
	#[serde(default)]
	pub receivers: Vec<ReceiverConfig>,
}
impl InteractableConfig {
	pub fn from_json(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}
}

struct ProfileEngines {
	target: String,
	dimensions: Vec<Vec<ThemeEngine>>,
}

/// A widget's interaction core: resolves state from input conditions, themes
/// its hosts and dispatches receiver events.
pub struct Interactable {
	settings: InteractableSettings,
	states: StateModel,
	profiles: Vec<ProfileEngines>,
	receivers: Vec<Box<dyn Receiver>>,
	toggle: ClickReceiver,
	toggled: Rc<Cell<bool>>,
	dimension_index: usize,
	event_sender: UnboundedSender<InteractableEvent>,
	events: UnboundedReceiver<InteractableEvent>,
}
impl Interactable {
	pub fn create(
		config: InteractableConfig,
		theme_registry: &ThemeRegistry,
		receiver_registry: &ReceiverRegistry,
	) -> Result<Self> {
		let InteractableConfig {
			states,
			settings,
			profiles,
			receivers: receiver_configs,
		} = config;
		if settings.dimensions == 0 {
			return Err(ConfigError::NoDimensions);
		}
		let states = StateModel::new(states)?;

		let profiles = profiles
			.into_iter()
			.map(|profile| {
				if profile.themes.len() != settings.dimensions {
					warn!(
						profile = profile.target,
						dimensions = settings.dimensions,
						found = profile.themes.len(),
						"profile dimension count mismatch"
					);
				}
				let dimensions = profile
					.themes
					.into_iter()
					.map(|themes| {
						themes
							.into_iter()
							.map(|theme| {
								if let Err(e) = theme.validate(&states, theme_registry) {
									warn!(theme = theme.name, error = %e, "theme will be partially applied");
								}
								ThemeEngine::new(theme, theme_registry)
							})
							.collect()
					})
					.collect();
				ProfileEngines {
					target: profile.target,
					dimensions,
				}
			})
			.collect();

		let (event_sender, events) = unbounded_channel();
		let receivers = receiver_configs
			.iter()
			.map(|config| receiver_registry.create(config, &event_sender))
			.collect::<Result<Vec<_>>>()?;

		let toggled = Rc::new(Cell::new(false));
		let toggle = ClickReceiver::new(settings.toggle_click_time, {
			let toggled = toggled.clone();
			EventSink::new(move || toggled.set(true))
		});

		Ok(Interactable {
			settings,
			states,
			profiles,
			receivers,
			toggle,
			toggled,
			dimension_index: 0,
			event_sender,
			events,
		})
	}
	pub fn from_json(
		json: &str,
		themes: &ThemeRegistry,
		receivers: &ReceiverRegistry,
	) -> Result<Self> {
		Self::create(InteractableConfig::from_json(json)?, themes, receivers)
	}

	/// Resolve state from this frame's conditions, then update themes and receivers. Run once every frame.
	pub fn update(&mut self, conditions: &[bool], delta: f32, hosts: &mut dyn HostResolver) {
		let mut mask = condition_bits(conditions);
		if !self.settings.enabled {
			mask |= DefaultState::Disabled.bit();
		}
		if self.states.update_bits(mask) {
			debug!(state = self.states.current().name, "interactable state changed");
		}
		let state = self.states.current().clone();

		self.toggle.on_update(&state, mask, delta);
		if self.toggled.replace(false) && self.settings.dimensions > 1 {
			self.set_dimension_index((self.dimension_index + 1) % self.settings.dimensions);
		}

		for profile in &mut self.profiles {
			let Some(host) = hosts.host(&profile.target) else {
				continue;
			};
			// every dimension shares the origin the host had before any theme moved it
			for engine in profile.dimensions.iter_mut().flatten() {
				engine.bind(&mut *host);
			}
			let Some(engines) = profile.dimensions.get_mut(self.dimension_index) else {
				continue;
			};
			for engine in engines {
				engine.on_update(&state, &mut *host, delta);
			}
		}

		for receiver in &mut self.receivers {
			receiver.on_update(&state, mask, delta);
		}
	}

	pub fn add_receiver(&mut self, receiver: impl Receiver + 'static) {
		self.receivers.push(Box::new(receiver));
	}
	/// Sender that config-built receivers use, for custom receivers to share
	pub fn event_sender(&self) -> UnboundedSender<InteractableEvent> {
		self.event_sender.clone()
	}
	pub fn try_recv_event(&mut self) -> Option<InteractableEvent> {
		self.events.try_recv().ok()
	}

	pub fn state(&self) -> &State {
		self.states.current()
	}
	pub fn states(&self) -> &StateModel {
		&self.states
	}
	pub fn has_focus(&self) -> bool {
		has_focus(self.state())
	}
	pub fn has_press(&self) -> bool {
		has_press(self.state(), self.states.conditions())
	}

	pub fn is_enabled(&self) -> bool {
		self.settings.enabled
	}
	pub fn set_enabled(&mut self, enabled: bool) {
		self.settings.enabled = enabled;
	}

	pub fn dimensions(&self) -> usize {
		self.settings.dimensions
	}
	pub fn dimension_index(&self) -> usize {
		self.dimension_index
	}
	/// Switch theme sets. The new set snaps to the current state on the next update.
	pub fn set_dimension_index(&mut self, index: usize) {
		let index = index.min(self.settings.dimensions - 1);
		if index == self.dimension_index {
			return;
		}
		debug!(from = self.dimension_index, to = index, "dimension changed");
		self.dimension_index = index;
		for profile in &mut self.profiles {
			if let Some(engines) = profile.dimensions.get_mut(index) {
				engines.iter_mut().for_each(ThemeEngine::reset);
			}
		}
	}
}
