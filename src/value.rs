use glam::{Quat, Vec2, Vec3, Vec4};
use lerp::Lerp;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

/// Linear RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
	pub r: f32,
	pub g: f32,
	pub b: f32,
	pub a: f32,
}
impl Color {
	pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
	pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
	pub const CLEAR: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

	pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
		Color { r, g, b, a }
	}
}
impl Default for Color {
	fn default() -> Self {
		Color::WHITE
	}
}
impl Add for Color {
	type Output = Color;
	fn add(self, rhs: Color) -> Color {
		Color::rgba(
			self.r + rhs.r,
			self.g + rhs.g,
			self.b + rhs.b,
			self.a + rhs.a,
		)
	}
}
impl Mul<f32> for Color {
	type Output = Color;
	fn mul(self, rhs: f32) -> Color {
		Color::rgba(self.r * rhs, self.g * rhs, self.b * rhs, self.a * rhs)
	}
}
impl From<Color> for Vec4 {
	fn from(c: Color) -> Self {
		Vec4::new(c.r, c.g, c.b, c.a)
	}
}
impl From<Vec4> for Color {
	fn from(v: Vec4) -> Self {
		Color::rgba(v.x, v.y, v.z, v.w)
	}
}

/// Opaque handle to an asset (texture, material, clip, object) owned by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetRef(pub String);
impl AssetRef {
	pub fn new(id: impl Into<String>) -> Self {
		AssetRef(id.into())
	}
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
	Float,
	Int,
	Color,
	Vector2,
	Vector3,
	Vector4,
	Quaternion,
	String,
	Bool,
	Texture,
	Material,
	AudioClip,
	Object,
}
impl ValueType {
	/// Whether values of this type blend over a transition instead of switching.
	pub fn is_interpolable(self) -> bool {
		matches!(
			self,
			ValueType::Float
				| ValueType::Int | ValueType::Color
				| ValueType::Vector2
				| ValueType::Vector3
				| ValueType::Vector4
				| ValueType::Quaternion
		)
	}
}

/// A typed theme value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ThemeValue {
	Float(f32),
	Int(i32),
	Color(Color),
	Vector2(Vec2),
	Vector3(Vec3),
	Vector4(Vec4),
	Quaternion(Quat),
	String(String),
	Bool(bool),
	Texture(AssetRef),
	Material(AssetRef),
	AudioClip(AssetRef),
	Object(AssetRef),
}
impl ThemeValue {
	/// The zero value handed out when a host can't provide one
	pub fn default_for(value_type: ValueType) -> Self {
		match value_type {
			ValueType::Float => ThemeValue::Float(0.0),
			ValueType::Int => ThemeValue::Int(0),
			ValueType::Color => ThemeValue::Color(Color::CLEAR),
			ValueType::Vector2 => ThemeValue::Vector2(Vec2::ZERO),
			ValueType::Vector3 => ThemeValue::Vector3(Vec3::ZERO),
			ValueType::Vector4 => ThemeValue::Vector4(Vec4::ZERO),
			ValueType::Quaternion => ThemeValue::Quaternion(Quat::IDENTITY),
			ValueType::String => ThemeValue::String(String::new()),
			ValueType::Bool => ThemeValue::Bool(false),
			ValueType::Texture => ThemeValue::Texture(AssetRef::default()),
			ValueType::Material => ThemeValue::Material(AssetRef::default()),
			ValueType::AudioClip => ThemeValue::AudioClip(AssetRef::default()),
			ValueType::Object => ThemeValue::Object(AssetRef::default()),
		}
	}

	pub fn value_type(&self) -> ValueType {
		match self {
			ThemeValue::Float(_) => ValueType::Float,
			ThemeValue::Int(_) => ValueType::Int,
			ThemeValue::Color(_) => ValueType::Color,
			ThemeValue::Vector2(_) => ValueType::Vector2,
			ThemeValue::Vector3(_) => ValueType::Vector3,
			ThemeValue::Vector4(_) => ValueType::Vector4,
			ThemeValue::Quaternion(_) => ValueType::Quaternion,
			ThemeValue::String(_) => ValueType::String,
			ThemeValue::Bool(_) => ValueType::Bool,
			ThemeValue::Texture(_) => ValueType::Texture,
			ThemeValue::Material(_) => ValueType::Material,
			ThemeValue::AudioClip(_) => ValueType::AudioClip,
			ThemeValue::Object(_) => ValueType::Object,
		}
	}

	/// Blend from `self` toward `target` at `t` in `[0, 1]`.
	///
	/// Discrete values and mismatched kinds take the target straight away.
	pub fn interpolate(&self, target: &ThemeValue, t: f32) -> ThemeValue {
		if t >= 1.0 {
			return target.clone();
		}
		let t = t.max(0.0);
		match (self, target) {
			(ThemeValue::Float(a), ThemeValue::Float(b)) => ThemeValue::Float(Lerp::lerp(*a, *b, t)),
			(ThemeValue::Int(a), ThemeValue::Int(b)) => {
				ThemeValue::Int(Lerp::lerp(*a as f32, *b as f32, t).round() as i32)
			}
			(ThemeValue::Color(a), ThemeValue::Color(b)) => ThemeValue::Color(Lerp::lerp(*a, *b, t)),
			(ThemeValue::Vector2(a), ThemeValue::Vector2(b)) => ThemeValue::Vector2(a.lerp(*b, t)),
			(ThemeValue::Vector3(a), ThemeValue::Vector3(b)) => ThemeValue::Vector3(a.lerp(*b, t)),
			(ThemeValue::Vector4(a), ThemeValue::Vector4(b)) => ThemeValue::Vector4(a.lerp(*b, t)),
			(ThemeValue::Quaternion(a), ThemeValue::Quaternion(b)) => {
				ThemeValue::Quaternion(a.slerp(*b, t))
			}
			_ => target.clone(),
		}
	}

	pub fn as_float(&self) -> Option<f32> {
		match self {
			ThemeValue::Float(v) => Some(*v),
			ThemeValue::Int(v) => Some(*v as f32),
			_ => None,
		}
	}
	pub fn as_color(&self) -> Option<Color> {
		match self {
			ThemeValue::Color(c) => Some(*c),
			ThemeValue::Vector4(v) => Some((*v).into()),
			_ => None,
		}
	}
	pub fn as_vec3(&self) -> Option<Vec3> {
		match self {
			ThemeValue::Vector3(v) => Some(*v),
			_ => None,
		}
	}
	pub fn as_vec4(&self) -> Option<Vec4> {
		match self {
			ThemeValue::Vector4(v) => Some(*v),
			ThemeValue::Color(c) => Some((*c).into()),
			_ => None,
		}
	}
	pub fn as_quat(&self) -> Option<Quat> {
		match self {
			ThemeValue::Quaternion(q) => Some(*q),
			_ => None,
		}
	}
	pub fn as_str(&self) -> Option<&str> {
		match self {
			ThemeValue::String(s) => Some(s),
			_ => None,
		}
	}
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			ThemeValue::Bool(b) => Some(*b),
			_ => None,
		}
	}
	pub fn as_asset(&self) -> Option<&AssetRef> {
		match self {
			ThemeValue::Texture(a)
			| ThemeValue::Material(a)
			| ThemeValue::AudioClip(a)
			| ThemeValue::Object(a) => Some(a),
			_ => None,
		}
	}
}
