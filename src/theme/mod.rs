mod registry;
pub mod targets;
pub use registry::*;

use crate::{
	easing::Easing,
	error::{ConfigError, Result},
	host::Host,
	state::{State, StateModel},
	value::{ThemeValue, ValueType},
};
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use tracing::{debug, trace, warn};

/// A typed property with one target value per state, indexed by state index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeProperty {
	pub name: String,
	pub value_type: ValueType,
	pub values: Vec<ThemeValue>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub shader_property: Option<String>,
}

/// Per-state property values of one theme kind plus how to ease between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
	pub name: String,
	pub kind: String,
	pub properties: Vec<ThemeProperty>,
	#[serde(default)]
	pub easing: Easing,
}
impl Theme {
	pub fn validate(&self, states: &StateModel, registry: &ThemeRegistry) -> Result<()> {
		if registry.target(&self.kind).is_none() {
			return Err(ConfigError::UnknownTheme(self.kind.clone()));
		}
		for property in &self.properties {
			if property.values.len() != states.len() {
				return Err(ConfigError::StateCountMismatch {
					property: property.name.clone(),
					values: property.values.len(),
					states: states.len(),
				});
			}
			if let Some(value) = property
				.values
				.iter()
				.find(|v| v.value_type() != property.value_type)
			{
				return Err(ConfigError::ValueTypeMismatch {
					property: property.name.clone(),
					expected: property.value_type,
					found: value.value_type(),
				});
			}
		}
		Ok(())
	}
}

/// Drives one theme against a host as the resolved state changes.
pub struct ThemeEngine {
	theme: Theme,
	target: Option<Rc<dyn ThemeTarget>>,
	easing: Easing,
	start_values: Vec<ThemeValue>,
	origins: Option<Vec<Option<ThemeValue>>>,
	last_state: Option<usize>,
}
impl ThemeEngine {
	pub fn new(theme: Theme, registry: &ThemeRegistry) -> Self {
		let target = registry.target(&theme.kind);
		if target.is_none() {
			warn!(
				kind = theme.kind,
				theme = theme.name,
				"unknown theme kind, theme will do nothing"
			);
		}
		let start_values = theme
			.properties
			.iter()
			.map(|p| ThemeValue::default_for(p.value_type))
			.collect();
		ThemeEngine {
			easing: theme.easing.clone(),
			theme,
			target,
			start_values,
			origins: None,
			last_state: None,
		}
	}

	pub fn theme(&self) -> &Theme {
		&self.theme
	}
	pub fn is_transitioning(&self) -> bool {
		self.last_state.is_some() && self.easing.is_playing()
	}
	/// Forget the last applied state so the next update snaps to its values.
	pub fn reset(&mut self) {
		self.last_state = None;
		self.easing.stop();
	}

	/// Apply the theme for `state`. Run once every frame.
	pub fn on_update(&mut self, state: &State, host: &mut dyn Host, delta: f32) {
		if self.target.is_none() {
			return;
		}
		self.bind(host);

		if self.last_state != Some(state.index) {
			let first = self.last_state.is_none();
			debug!(
				theme = self.theme.name,
				state = state.name,
				first,
				"theme state changed"
			);
			for property in 0..self.theme.properties.len() {
				self.start_values[property] = self.property_value(property, host);
			}
			if first {
				self.easing.stop();
			} else {
				self.easing.start();
			}
			self.last_state = Some(state.index);

			let progress = self.easing.progress();
			for property in 0..self.theme.properties.len() {
				self.set_value(property, state.index, progress, host);
			}
		} else if self.easing.is_playing() {
			self.easing.advance(delta);
			let progress = self.easing.progress();
			trace!(theme = self.theme.name, progress, "theme easing");
			for property in 0..self.theme.properties.len() {
				if self.theme.properties[property].value_type.is_interpolable() {
					self.set_value(property, state.index, progress, host);
				}
			}
		}
	}

	/// Capture the host values relative themes apply against. Only the first call has any effect.
	pub fn bind(&mut self, host: &mut dyn Host) {
		if self.origins.is_some() {
			return;
		}
		let Some(target) = &self.target else {
			return;
		};
		self.origins = Some(
			self.theme
				.properties
				.iter()
				.map(|p| target.origin(host, p))
				.collect(),
		);
	}
	fn origin(&self, property: usize) -> Option<&ThemeValue> {
		self.origins.as_ref()?.get(property)?.as_ref()
	}

	/// Read the live value of a property from the host, or its default when
	/// the host lacks the capability.
	pub fn property_value(&self, property: usize, host: &mut dyn Host) -> ThemeValue {
		let Some(theme_property) = self.theme.properties.get(property) else {
			return ThemeValue::Float(0.0);
		};
		self.target
			.as_ref()
			.and_then(|t| t.get(host, theme_property, self.origin(property)))
			.unwrap_or_else(|| ThemeValue::default_for(theme_property.value_type))
	}

	/// Write the blend between the captured start value and the value for `state_index`.
	pub fn set_value(
		&mut self,
		property: usize,
		state_index: usize,
		progress: f32,
		host: &mut dyn Host,
	) {
		let (Some(target), Some(theme_property)) =
			(&self.target, self.theme.properties.get(property))
		else {
			return;
		};
		let Some(goal) = theme_property.values.get(state_index) else {
			return;
		};
		let value = match self.start_values.get(property) {
			Some(start) => start.interpolate(goal, progress),
			None => goal.clone(),
		};
		target.set(host, theme_property, self.origin(property), &value);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{easing::Curve, host::Transform, state::DefaultState};
	use glam::{Quat, Vec3};

	#[derive(Default)]
	struct Node {
		position: Vec3,
		scale: Vec3,
		writes: usize,
	}
	impl Transform for Node {
		fn position(&self) -> Vec3 {
			self.position
		}
		fn set_position(&mut self, position: Vec3) {
			self.position = position;
			self.writes += 1;
		}
		fn scale(&self) -> Vec3 {
			self.scale
		}
		fn set_scale(&mut self, scale: Vec3) {
			self.scale = scale;
			self.writes += 1;
		}
		fn rotation(&self) -> Quat {
			Quat::IDENTITY
		}
		fn set_rotation(&mut self, _rotation: Quat) {}
	}
	impl Host for Node {
		fn transform(&mut self) -> Option<&mut dyn Transform> {
			Some(self)
		}
	}
	struct Empty;
	impl Host for Empty {}

	fn scale_theme(easing: Easing) -> Theme {
		Theme {
			name: "grow".into(),
			kind: "scale".into(),
			properties: vec![ThemeProperty {
				name: "Scale".into(),
				value_type: ValueType::Vector3,
				values: vec![
					ThemeValue::Vector3(Vec3::ONE),
					ThemeValue::Vector3(Vec3::splat(2.0)),
					ThemeValue::Vector3(Vec3::splat(3.0)),
					ThemeValue::Vector3(Vec3::splat(0.5)),
				],
				shader_property: None,
			}],
			easing,
		}
	}
	fn state(s: DefaultState) -> State {
		StateModel::interactable().states()[s.index()].clone()
	}

	#[test]
	fn first_activation_snaps() {
		let registry = ThemeRegistry::with_defaults();
		let mut engine = ThemeEngine::new(scale_theme(Easing::new(1.0, Curve::Linear)), &registry);
		let mut node = Node::default();
		engine.on_update(&state(DefaultState::Focus), &mut node, 0.0);
		assert_eq!(node.scale, Vec3::splat(2.0));
	}

	#[test]
	fn eases_between_states() {
		let registry = ThemeRegistry::with_defaults();
		let mut engine = ThemeEngine::new(scale_theme(Easing::new(1.0, Curve::Linear)), &registry);
		let mut node = Node::default();
		engine.on_update(&state(DefaultState::Default), &mut node, 0.0);
		assert_eq!(node.scale, Vec3::ONE);

		engine.on_update(&state(DefaultState::Press), &mut node, 0.0);
		// transition tick writes the start value
		assert_eq!(node.scale, Vec3::ONE);
		assert!(engine.is_transitioning());

		engine.on_update(&state(DefaultState::Press), &mut node, 0.5);
		assert_eq!(node.scale, Vec3::splat(2.0));
		engine.on_update(&state(DefaultState::Press), &mut node, 0.5);
		assert_eq!(node.scale, Vec3::splat(3.0));
		assert!(!engine.is_transitioning());

		let writes = node.writes;
		engine.on_update(&state(DefaultState::Press), &mut node, 0.5);
		assert_eq!(node.writes, writes);
	}

	#[test]
	fn instant_easing_snaps_on_change() {
		let registry = ThemeRegistry::with_defaults();
		let mut engine = ThemeEngine::new(scale_theme(Easing::instant()), &registry);
		let mut node = Node::default();
		engine.on_update(&state(DefaultState::Default), &mut node, 0.0);
		engine.on_update(&state(DefaultState::Disabled), &mut node, 0.016);
		assert_eq!(node.scale, Vec3::splat(0.5));
	}

	#[test]
	fn set_then_get_round_trips() {
		let registry = ThemeRegistry::with_defaults();
		let mut engine = ThemeEngine::new(scale_theme(Easing::instant()), &registry);
		let mut node = Node::default();
		for s in DefaultState::ALL {
			engine.set_value(0, s.index(), 1.0, &mut node);
			assert_eq!(
				engine.property_value(0, &mut node),
				engine.theme().properties[0].values[s.index()]
			);
		}
	}

	#[test]
	fn missing_capability_is_silent() {
		let registry = ThemeRegistry::with_defaults();
		let mut engine = ThemeEngine::new(scale_theme(Easing::instant()), &registry);
		let mut host = Empty;
		engine.on_update(&state(DefaultState::Press), &mut host, 0.0);
		assert_eq!(
			engine.property_value(0, &mut host),
			ThemeValue::Vector3(Vec3::ZERO)
		);
	}

	#[test]
	fn short_value_lists_skip_writes() {
		let registry = ThemeRegistry::with_defaults();
		let mut theme = scale_theme(Easing::instant());
		theme.properties[0].values.truncate(2);
		assert!(matches!(
			theme.validate(&StateModel::interactable(), &registry),
			Err(ConfigError::StateCountMismatch { values: 2, states: 4, .. })
		));

		let mut engine = ThemeEngine::new(theme, &registry);
		let mut node = Node::default();
		engine.on_update(&state(DefaultState::Disabled), &mut node, 0.0);
		assert_eq!(node.writes, 0);
	}

	#[test]
	fn offset_is_relative_to_origin() {
		let registry = ThemeRegistry::with_defaults();
		let mut theme = registry
			.create_theme("offset", &StateModel::interactable())
			.unwrap();
		theme.properties[0].values[DefaultState::Press.index()] =
			ThemeValue::Vector3(Vec3::new(0.0, 0.0, -0.5));
		let mut engine = ThemeEngine::new(theme, &registry);
		let mut node = Node {
			position: Vec3::new(1.0, 2.0, 3.0),
			..Default::default()
		};
		engine.on_update(&state(DefaultState::Default), &mut node, 0.0);
		assert_eq!(node.position, Vec3::new(1.0, 2.0, 3.0));
		engine.on_update(&state(DefaultState::Press), &mut node, 0.0);
		assert_eq!(node.position, Vec3::new(1.0, 2.0, 2.5));
		assert_eq!(
			engine.property_value(0, &mut node),
			ThemeValue::Vector3(Vec3::new(0.0, 0.0, -0.5))
		);
	}

	#[test]
	fn unknown_kind_does_nothing() {
		let registry = ThemeRegistry::with_defaults();
		let mut theme = scale_theme(Easing::instant());
		theme.kind = "wobble".into();
		assert!(matches!(
			theme.validate(&StateModel::interactable(), &registry),
			Err(ConfigError::UnknownTheme(_))
		));
		let mut engine = ThemeEngine::new(theme, &registry);
		let mut node = Node::default();
		engine.on_update(&state(DefaultState::Press), &mut node, 0.0);
		assert_eq!(node.writes, 0);
	}
}
