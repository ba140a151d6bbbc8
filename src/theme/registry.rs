use super::{targets, Theme, ThemeProperty};
use crate::{
	easing::Easing,
	host::{Capability, Host},
	state::StateModel,
	value::{ThemeValue, ValueType},
};
use rustc_hash::FxHashMap;
use std::rc::Rc;

/// A property a theme kind animates, with the value used to fill new themes.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
	pub name: &'static str,
	pub value_type: ValueType,
	pub default: ThemeValue,
	/// Host side property name, for shader style targets
	pub shader_property: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThemeDescriptor {
	pub kind: &'static str,
	pub properties: Vec<PropertyDescriptor>,
	/// The theme applies to a host with any one of these
	pub capabilities: &'static [Capability],
}
impl ThemeDescriptor {
	pub fn is_applicable(&self, host: &mut dyn Host) -> bool {
		self.capabilities.iter().any(|c| host.supports(*c))
	}
}

/// The Get/Set pair behind a theme kind.
///
/// New property kinds are added by implementing this and registering it.
pub trait ThemeTarget {
	fn descriptor(&self) -> ThemeDescriptor;
	/// Value captured once when a theme first binds to a host
	fn origin(&self, _host: &mut dyn Host, _property: &ThemeProperty) -> Option<ThemeValue> {
		None
	}
	fn get(
		&self,
		host: &mut dyn Host,
		property: &ThemeProperty,
		origin: Option<&ThemeValue>,
	) -> Option<ThemeValue>;
	fn set(
		&self,
		host: &mut dyn Host,
		property: &ThemeProperty,
		origin: Option<&ThemeValue>,
		value: &ThemeValue,
	);
}

/// Theme kinds by key. Built once and passed to whatever needs it.
#[derive(Clone)]
pub struct ThemeRegistry {
	targets: FxHashMap<String, Rc<dyn ThemeTarget>>,
}
impl ThemeRegistry {
	pub fn empty() -> Self {
		ThemeRegistry {
			targets: FxHashMap::default(),
		}
	}
	pub fn with_defaults() -> Self {
		let mut registry = ThemeRegistry::empty();
		registry.register(targets::ColorTheme);
		registry.register(targets::ShaderFloatTheme);
		registry.register(targets::ShaderVectorTheme);
		registry.register(targets::TextureTheme);
		registry.register(targets::MaterialTheme);
		registry.register(targets::ScaleTheme);
		registry.register(targets::OffsetTheme);
		registry.register(targets::RotationTheme);
		registry.register(targets::TextTheme);
		registry.register(targets::AudioTheme);
		registry.register(targets::AnimatorTheme);
		registry.register(targets::ActivateTheme);
		registry
	}

	/// Register a target under its descriptor's kind, replacing any previous one.
	pub fn register(&mut self, target: impl ThemeTarget + 'static) {
		let kind = target.descriptor().kind.to_string();
		self.targets.insert(kind, Rc::new(target));
	}

	pub fn target(&self, kind: &str) -> Option<Rc<dyn ThemeTarget>> {
		self.targets.get(kind).cloned()
	}
	pub fn descriptor(&self, kind: &str) -> Option<ThemeDescriptor> {
		self.targets.get(kind).map(|t| t.descriptor())
	}
	pub fn kinds(&self) -> Vec<&str> {
		let mut kinds: Vec<&str> = self.targets.keys().map(String::as_str).collect();
		kinds.sort_unstable();
		kinds
	}

	/// Kinds whose capabilities the host has
	pub fn applicable_kinds(&self, host: &mut dyn Host) -> Vec<&str> {
		let mut kinds: Vec<&str> = self
			.targets
			.iter()
			.filter(|(_, t)| t.descriptor().is_applicable(host))
			.map(|(k, _)| k.as_str())
			.collect();
		kinds.sort_unstable();
		kinds
	}

	/// A theme of `kind` with every state set to the descriptor defaults.
	pub fn create_theme(&self, kind: &str, states: &StateModel) -> Option<Theme> {
		let descriptor = self.descriptor(kind)?;
		Some(Theme {
			name: kind.to_string(),
			kind: kind.to_string(),
			properties: descriptor
				.properties
				.iter()
				.map(|p| ThemeProperty {
					name: p.name.to_string(),
					value_type: p.value_type,
					values: vec![p.default.clone(); states.len()],
					shader_property: p.shader_property.map(str::to_string),
				})
				.collect(),
			easing: Easing::default(),
		})
	}
}
impl Default for ThemeRegistry {
	fn default() -> Self {
		ThemeRegistry::with_defaults()
	}
}
