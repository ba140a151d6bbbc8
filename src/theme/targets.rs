//! Built-in theme kinds.

use super::{
	registry::{PropertyDescriptor, ThemeDescriptor, ThemeTarget},
	ThemeProperty,
};
use crate::{
	host::{Capability, Host},
	value::{AssetRef, Color, ThemeValue, ValueType},
};
use glam::{Quat, Vec3, Vec4};

const MAIN_COLOR: &str = "_Color";
const MAIN_TEXTURE: &str = "_MainTex";

fn shader_property<'a>(property: &'a ThemeProperty, fallback: &'a str) -> &'a str {
	property.shader_property.as_deref().unwrap_or(fallback)
}

/// Text color when the host has text, otherwise a material color
pub struct ColorTheme;
impl ThemeTarget for ColorTheme {
	fn descriptor(&self) -> ThemeDescriptor {
		ThemeDescriptor {
			kind: "color",
			properties: vec![PropertyDescriptor {
				name: "Color",
				value_type: ValueType::Color,
				default: ThemeValue::Color(Color::WHITE),
				shader_property: Some(MAIN_COLOR),
			}],
			capabilities: &[Capability::Text, Capability::Renderer],
		}
	}
	fn get(
		&self,
		host: &mut dyn Host,
		property: &ThemeProperty,
		_origin: Option<&ThemeValue>,
	) -> Option<ThemeValue> {
		if let Some(text) = host.text() {
			return text.color().map(ThemeValue::Color);
		}
		host.renderer()?
			.color(shader_property(property, MAIN_COLOR))
			.map(ThemeValue::Color)
	}
	fn set(
		&self,
		host: &mut dyn Host,
		property: &ThemeProperty,
		_origin: Option<&ThemeValue>,
		value: &ThemeValue,
	) {
		let Some(color) = value.as_color() else {
			return;
		};
		if let Some(text) = host.text() {
			text.set_color(color);
		} else if let Some(renderer) = host.renderer() {
			renderer.set_color(shader_property(property, MAIN_COLOR), color);
		}
	}
}

pub struct ShaderFloatTheme;
impl ThemeTarget for ShaderFloatTheme {
	fn descriptor(&self) -> ThemeDescriptor {
		ThemeDescriptor {
			kind: "shader_float",
			properties: vec![PropertyDescriptor {
				name: "Shader Float",
				value_type: ValueType::Float,
				default: ThemeValue::Float(0.0),
				shader_property: None,
			}],
			capabilities: &[Capability::Renderer],
		}
	}
	fn get(
		&self,
		host: &mut dyn Host,
		property: &ThemeProperty,
		_origin: Option<&ThemeValue>,
	) -> Option<ThemeValue> {
		let name = property.shader_property.as_deref()?;
		host.renderer()?.float(name).map(ThemeValue::Float)
	}
	fn set(
		&self,
		host: &mut dyn Host,
		property: &ThemeProperty,
		_origin: Option<&ThemeValue>,
		value: &ThemeValue,
	) {
		let (Some(name), Some(value)) = (property.shader_property.as_deref(), value.as_float())
		else {
			return;
		};
		if let Some(renderer) = host.renderer() {
			renderer.set_float(name, value);
		}
	}
}

pub struct ShaderVectorTheme;
impl ThemeTarget for ShaderVectorTheme {
	fn descriptor(&self) -> ThemeDescriptor {
		ThemeDescriptor {
			kind: "shader_vector",
			properties: vec![PropertyDescriptor {
				name: "Shader Vector",
				value_type: ValueType::Vector4,
				default: ThemeValue::Vector4(Vec4::ZERO),
				shader_property: None,
			}],
			capabilities: &[Capability::Renderer],
		}
	}
	fn get(
		&self,
		host: &mut dyn Host,
		property: &ThemeProperty,
		_origin: Option<&ThemeValue>,
	) -> Option<ThemeValue> {
		let name = property.shader_property.as_deref()?;
		host.renderer()?.vector(name).map(ThemeValue::Vector4)
	}
	fn set(
		&self,
		host: &mut dyn Host,
		property: &ThemeProperty,
		_origin: Option<&ThemeValue>,
		value: &ThemeValue,
	) {
		let (Some(name), Some(value)) = (property.shader_property.as_deref(), value.as_vec4())
		else {
			return;
		};
		if let Some(renderer) = host.renderer() {
			renderer.set_vector(name, value);
		}
	}
}

pub struct TextureTheme;
impl ThemeTarget for TextureTheme {
	fn descriptor(&self) -> ThemeDescriptor {
		ThemeDescriptor {
			kind: "texture",
			properties: vec![PropertyDescriptor {
				name: "Texture",
				value_type: ValueType::Texture,
				default: ThemeValue::Texture(AssetRef::default()),
				shader_property: Some(MAIN_TEXTURE),
			}],
			capabilities: &[Capability::Renderer],
		}
	}
	fn get(
		&self,
		host: &mut dyn Host,
		property: &ThemeProperty,
		_origin: Option<&ThemeValue>,
	) -> Option<ThemeValue> {
		host.renderer()?
			.texture(shader_property(property, MAIN_TEXTURE))
			.map(ThemeValue::Texture)
	}
	fn set(
		&self,
		host: &mut dyn Host,
		property: &ThemeProperty,
		_origin: Option<&ThemeValue>,
		value: &ThemeValue,
	) {
		let (Some(renderer), ThemeValue::Texture(texture)) = (host.renderer(), value) else {
			return;
		};
		renderer.set_texture(shader_property(property, MAIN_TEXTURE), texture.clone());
	}
}

pub struct MaterialTheme;
impl ThemeTarget for MaterialTheme {
	fn descriptor(&self) -> ThemeDescriptor {
		ThemeDescriptor {
			kind: "material",
			properties: vec![PropertyDescriptor {
				name: "Material",
				value_type: ValueType::Material,
				default: ThemeValue::Material(AssetRef::default()),
				shader_property: None,
			}],
			capabilities: &[Capability::Renderer],
		}
	}
	fn get(
		&self,
		host: &mut dyn Host,
		_property: &ThemeProperty,
		_origin: Option<&ThemeValue>,
	) -> Option<ThemeValue> {
		host.renderer()?.material().map(ThemeValue::Material)
	}
	fn set(
		&self,
		host: &mut dyn Host,
		_property: &ThemeProperty,
		_origin: Option<&ThemeValue>,
		value: &ThemeValue,
	) {
		let (Some(renderer), ThemeValue::Material(material)) = (host.renderer(), value) else {
			return;
		};
		if !material.is_empty() {
			renderer.set_material(material.clone());
		}
	}
}

pub struct ScaleTheme;
impl ThemeTarget for ScaleTheme {
	fn descriptor(&self) -> ThemeDescriptor {
		ThemeDescriptor {
			kind: "scale",
			properties: vec![PropertyDescriptor {
				name: "Scale",
				value_type: ValueType::Vector3,
				default: ThemeValue::Vector3(Vec3::ONE),
				shader_property: None,
			}],
			capabilities: &[Capability::Transform],
		}
	}
	fn get(
		&self,
		host: &mut dyn Host,
		_property: &ThemeProperty,
		_origin: Option<&ThemeValue>,
	) -> Option<ThemeValue> {
		Some(ThemeValue::Vector3(host.transform()?.scale()))
	}
	fn set(
		&self,
		host: &mut dyn Host,
		_property: &ThemeProperty,
		_origin: Option<&ThemeValue>,
		value: &ThemeValue,
	) {
		if let (Some(transform), Some(scale)) = (host.transform(), value.as_vec3()) {
			transform.set_scale(scale);
		}
	}
}

/// Position offset relative to where the host was when the theme bound to it
pub struct OffsetTheme;
impl ThemeTarget for OffsetTheme {
	fn descriptor(&self) -> ThemeDescriptor {
		ThemeDescriptor {
			kind: "offset",
			properties: vec![PropertyDescriptor {
				name: "Offset",
				value_type: ValueType::Vector3,
				default: ThemeValue::Vector3(Vec3::ZERO),
				shader_property: None,
			}],
			capabilities: &[Capability::Transform],
		}
	}
	fn origin(&self, host: &mut dyn Host, _property: &ThemeProperty) -> Option<ThemeValue> {
		Some(ThemeValue::Vector3(host.transform()?.position()))
	}
	fn get(
		&self,
		host: &mut dyn Host,
		_property: &ThemeProperty,
		origin: Option<&ThemeValue>,
	) -> Option<ThemeValue> {
		let origin = origin.and_then(ThemeValue::as_vec3).unwrap_or(Vec3::ZERO);
		Some(ThemeValue::Vector3(host.transform()?.position() - origin))
	}
	fn set(
		&self,
		host: &mut dyn Host,
		_property: &ThemeProperty,
		origin: Option<&ThemeValue>,
		value: &ThemeValue,
	) {
		let origin = origin.and_then(ThemeValue::as_vec3).unwrap_or(Vec3::ZERO);
		if let (Some(transform), Some(offset)) = (host.transform(), value.as_vec3()) {
			transform.set_position(origin + offset);
		}
	}
}

pub struct RotationTheme;
impl ThemeTarget for RotationTheme {
	fn descriptor(&self) -> ThemeDescriptor {
		ThemeDescriptor {
			kind: "rotation",
			properties: vec![PropertyDescriptor {
				name: "Rotation",
				value_type: ValueType::Quaternion,
				default: ThemeValue::Quaternion(Quat::IDENTITY),
				shader_property: None,
			}],
			capabilities: &[Capability::Transform],
		}
	}
	fn get(
		&self,
		host: &mut dyn Host,
		_property: &ThemeProperty,
		_origin: Option<&ThemeValue>,
	) -> Option<ThemeValue> {
		Some(ThemeValue::Quaternion(host.transform()?.rotation()))
	}
	fn set(
		&self,
		host: &mut dyn Host,
		_property: &ThemeProperty,
		_origin: Option<&ThemeValue>,
		value: &ThemeValue,
	) {
		if let (Some(transform), Some(rotation)) = (host.transform(), value.as_quat()) {
			transform.set_rotation(rotation.normalize());
		}
	}
}

pub struct TextTheme;
impl ThemeTarget for TextTheme {
	fn descriptor(&self) -> ThemeDescriptor {
		ThemeDescriptor {
			kind: "text",
			properties: vec![PropertyDescriptor {
				name: "Text",
				value_type: ValueType::String,
				default: ThemeValue::String(String::new()),
				shader_property: None,
			}],
			capabilities: &[Capability::Text],
		}
	}
	fn get(
		&self,
		host: &mut dyn Host,
		_property: &ThemeProperty,
		_origin: Option<&ThemeValue>,
	) -> Option<ThemeValue> {
		host.text()?.text().map(ThemeValue::String)
	}
	fn set(
		&self,
		host: &mut dyn Host,
		_property: &ThemeProperty,
		_origin: Option<&ThemeValue>,
		value: &ThemeValue,
	) {
		if let (Some(text), Some(value)) = (host.text(), value.as_str()) {
			text.set_text(value);
		}
	}
}

/// Plays the state's clip when the state is entered
pub struct AudioTheme;
impl ThemeTarget for AudioTheme {
	fn descriptor(&self) -> ThemeDescriptor {
		ThemeDescriptor {
			kind: "audio",
			properties: vec![PropertyDescriptor {
				name: "Audio",
				value_type: ValueType::AudioClip,
				default: ThemeValue::AudioClip(AssetRef::default()),
				shader_property: None,
			}],
			capabilities: &[Capability::Audio],
		}
	}
	fn get(
		&self,
		host: &mut dyn Host,
		_property: &ThemeProperty,
		_origin: Option<&ThemeValue>,
	) -> Option<ThemeValue> {
		host.audio()?.clip().map(ThemeValue::AudioClip)
	}
	fn set(
		&self,
		host: &mut dyn Host,
		_property: &ThemeProperty,
		_origin: Option<&ThemeValue>,
		value: &ThemeValue,
	) {
		let (Some(audio), ThemeValue::AudioClip(clip)) = (host.audio(), value) else {
			return;
		};
		if !clip.is_empty() {
			audio.play(clip);
		}
	}
}

/// Fires the state's animator trigger when the state is entered
pub struct AnimatorTheme;
impl ThemeTarget for AnimatorTheme {
	fn descriptor(&self) -> ThemeDescriptor {
		ThemeDescriptor {
			kind: "animator",
			properties: vec![PropertyDescriptor {
				name: "Trigger",
				value_type: ValueType::String,
				default: ThemeValue::String(String::new()),
				shader_property: None,
			}],
			capabilities: &[Capability::Animator],
		}
	}
	fn get(
		&self,
		_host: &mut dyn Host,
		_property: &ThemeProperty,
		_origin: Option<&ThemeValue>,
	) -> Option<ThemeValue> {
		None
	}
	fn set(
		&self,
		host: &mut dyn Host,
		_property: &ThemeProperty,
		_origin: Option<&ThemeValue>,
		value: &ThemeValue,
	) {
		let (Some(animator), Some(trigger)) = (host.animator(), value.as_str()) else {
			return;
		};
		if !trigger.is_empty() {
			animator.set_trigger(trigger);
		}
	}
}

pub struct ActivateTheme;
impl ThemeTarget for ActivateTheme {
	fn descriptor(&self) -> ThemeDescriptor {
		ThemeDescriptor {
			kind: "activate",
			properties: vec![PropertyDescriptor {
				name: "Activate",
				value_type: ValueType::Bool,
				default: ThemeValue::Bool(true),
				shader_property: None,
			}],
			capabilities: &[Capability::Activation],
		}
	}
	fn get(
		&self,
		host: &mut dyn Host,
		_property: &ThemeProperty,
		_origin: Option<&ThemeValue>,
	) -> Option<ThemeValue> {
		Some(ThemeValue::Bool(host.activation()?.active()))
	}
	fn set(
		&self,
		host: &mut dyn Host,
		_property: &ThemeProperty,
		_origin: Option<&ThemeValue>,
		value: &ThemeValue,
	) {
		if let (Some(activation), Some(active)) = (host.activation(), value.as_bool()) {
			activation.set_active(active);
		}
	}
}
