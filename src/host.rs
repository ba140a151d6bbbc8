//! Capabilities a host object can expose to themes.
//!
//! The binding layer implements [`Host`] for whatever it wraps and hands out the
//! capabilities that object actually has. Every getter defaults to `None` and
//! every setter to a no-op, so a host only implements what it supports.

use crate::value::{AssetRef, Color};
use glam::{Quat, Vec3, Vec4};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
	Renderer,
	Text,
	Transform,
	Audio,
	Animator,
	Activation,
}

/// Material/shader surface
pub trait Renderer {
	fn color(&self, _property: &str) -> Option<Color> {
		None
	}
	fn set_color(&mut self, _property: &str, _color: Color) {}
	fn float(&self, _property: &str) -> Option<f32> {
		None
	}
	fn set_float(&mut self, _property: &str, _value: f32) {}
	fn vector(&self, _property: &str) -> Option<Vec4> {
		None
	}
	fn set_vector(&mut self, _property: &str, _value: Vec4) {}
	fn texture(&self, _property: &str) -> Option<AssetRef> {
		None
	}
	fn set_texture(&mut self, _property: &str, _texture: AssetRef) {}
	fn material(&self) -> Option<AssetRef> {
		None
	}
	fn set_material(&mut self, _material: AssetRef) {}
}

/// Text label
pub trait Text {
	fn color(&self) -> Option<Color> {
		None
	}
	fn set_color(&mut self, _color: Color) {}
	fn text(&self) -> Option<String> {
		None
	}
	fn set_text(&mut self, _text: &str) {}
}

/// Local transform
pub trait Transform {
	fn position(&self) -> Vec3;
	fn set_position(&mut self, position: Vec3);
	fn scale(&self) -> Vec3;
	fn set_scale(&mut self, scale: Vec3);
	fn rotation(&self) -> Quat;
	fn set_rotation(&mut self, rotation: Quat);
}

pub trait Audio {
	fn clip(&self) -> Option<AssetRef> {
		None
	}
	fn play(&mut self, clip: &AssetRef);
}

pub trait Animator {
	fn set_trigger(&mut self, trigger: &str);
}

pub trait Activation {
	fn active(&self) -> bool;
	fn set_active(&mut self, active: bool);
}

/// An object whose properties themes read and write.
pub trait Host {
	fn renderer(&mut self) -> Option<&mut dyn Renderer> {
		None
	}
	fn text(&mut self) -> Option<&mut dyn Text> {
		None
	}
	fn transform(&mut self) -> Option<&mut dyn Transform> {
		None
	}
	fn audio(&mut self) -> Option<&mut dyn Audio> {
		None
	}
	fn animator(&mut self) -> Option<&mut dyn Animator> {
		None
	}
	fn activation(&mut self) -> Option<&mut dyn Activation> {
		None
	}

	fn supports(&mut self, capability: Capability) -> bool {
		match capability {
			Capability::Renderer => self.renderer().is_some(),
			Capability::Text => self.text().is_some(),
			Capability::Transform => self.transform().is_some(),
			Capability::Audio => self.audio().is_some(),
			Capability::Animator => self.animator().is_some(),
			Capability::Activation => self.activation().is_some(),
		}
	}
}

/// Finds the host a profile targets.
pub trait HostResolver {
	fn host(&mut self, target: &str) -> Option<&mut dyn Host>;
}
impl HostResolver for FxHashMap<String, Box<dyn Host>> {
	fn host(&mut self, target: &str) -> Option<&mut dyn Host> {
		match self.get_mut(target) {
			Some(host) => Some(host.as_mut()),
			None => None,
		}
	}
}

/// Resolves every target to the same host.
pub struct SingleHost<'a>(pub &'a mut dyn Host);
impl HostResolver for SingleHost<'_> {
	fn host(&mut self, _target: &str) -> Option<&mut dyn Host> {
		Some(&mut *self.0)
	}
}
