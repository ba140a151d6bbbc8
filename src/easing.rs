//! Time based progress for theme transitions.

use map_range::MapRange;
use serde::{Deserialize, Serialize};

/// Durations below this are treated as instant.
const MIN_DURATION: f32 = 1e-5;

/// A single point on a keyframe curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
	pub time: f32,
	pub value: f32,
}

/// Shape applied to linear progress
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Curve {
	#[default]
	Linear,
	EaseInQuad,
	EaseOutQuad,
	EaseInOutQuad,
	EaseInCubic,
	EaseOutCubic,
	EaseInOutCubic,
	EaseInQuart,
	EaseOutQuart,
	EaseInOutQuart,
	CubicBezier(f32, f32, f32, f32),
	/// Piecewise linear through the keyframes, sorted by time
	Keyframes(Vec<Keyframe>),
}
impl Curve {
	pub fn is_linear(&self) -> bool {
		match self {
			Curve::Linear => true,
			Curve::CubicBezier(x1, y1, x2, y2) => x1 == y1 && x2 == y2,
			Curve::Keyframes(keys) => {
				keys.len() == 2
					&& keys[0] == Keyframe {
						time: 0.0,
						value: 0.0,
					} && keys[1] == Keyframe {
					time: 1.0,
					value: 1.0,
				}
			}
			_ => false,
		}
	}

	pub fn apply(&self, t: f32) -> f32 {
		match self {
			Curve::Linear => t,
			Curve::EaseInQuad => t * t,
			Curve::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
			Curve::EaseInOutQuad => {
				if t < 0.5 {
					2.0 * t * t
				} else {
					1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
				}
			}
			Curve::EaseInCubic => t * t * t,
			Curve::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
			Curve::EaseInOutCubic => {
				if t < 0.5 {
					4.0 * t * t * t
				} else {
					1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
				}
			}
			Curve::EaseInQuart => t * t * t * t,
			Curve::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
			Curve::EaseInOutQuart => {
				if t < 0.5 {
					8.0 * t * t * t * t
				} else {
					1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
				}
			}
			Curve::CubicBezier(x1, y1, x2, y2) => cubic_bezier(t, *x1, *y1, *x2, *y2),
			Curve::Keyframes(keys) => keyframes(keys, t),
		}
	}
}

fn keyframes(keys: &[Keyframe], t: f32) -> f32 {
	let (Some(first), Some(last)) = (keys.first(), keys.last()) else {
		return t;
	};
	if t <= first.time {
		return first.value;
	}
	if t >= last.time {
		return last.value;
	}
	keys.windows(2)
		.find(|pair| t <= pair[1].time)
		.map(|pair| {
			let (a, b) = (pair[0], pair[1]);
			if b.time - a.time <= f32::EPSILON {
				b.value
			} else {
				t.map_range(a.time..b.time, a.value..b.value)
			}
		})
		.unwrap_or(last.value)
}

/// Same evaluation as CSS `cubic-bezier()`: Newton-Raphson with a bisection fallback.
fn cubic_bezier(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
	if t <= 0.0 {
		return 0.0;
	}
	if t >= 1.0 {
		return 1.0;
	}
	let x = t as f64;
	let (x1, y1, x2, y2) = (x1 as f64, y1 as f64, x2 as f64, y2 as f64);

	let mut p = x;
	for _ in 0..8 {
		let err = bezier_sample(p, x1, x2) - x;
		if err.abs() < 1e-7 {
			return bezier_sample(p, y1, y2) as f32;
		}
		let slope = bezier_slope(p, x1, x2);
		if slope.abs() < 1e-7 {
			break;
		}
		p -= err / slope;
	}

	let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
	p = x;
	for _ in 0..20 {
		let value = bezier_sample(p, x1, x2);
		if (value - x).abs() < 1e-7 {
			break;
		}
		if value < x {
			lo = p;
		} else {
			hi = p;
		}
		p = (lo + hi) * 0.5;
	}
	bezier_sample(p, y1, y2) as f32
}
#[inline]
fn bezier_sample(t: f64, p1: f64, p2: f64) -> f64 {
	let a = 1.0 - 3.0 * p2 + 3.0 * p1;
	let b = 3.0 * p2 - 6.0 * p1;
	let c = 3.0 * p1;
	((a * t + b) * t + c) * t
}
#[inline]
fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
	let a = 1.0 - 3.0 * p2 + 3.0 * p1;
	let b = 3.0 * p2 - 6.0 * p1;
	let c = 3.0 * p1;
	(3.0 * a * t + 2.0 * b) * t + c
}

/// Transition timing. `elapsed` is runtime progress and is never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Easing {
	pub enabled: bool,
	/// Seconds
	pub duration: f32,
	#[serde(default)]
	pub curve: Curve,
	#[serde(skip)]
	elapsed: f32,
}
impl Default for Easing {
	fn default() -> Self {
		Easing {
			enabled: false,
			duration: 0.5,
			curve: Curve::Linear,
			elapsed: 0.0,
		}
	}
}
impl Easing {
	pub fn new(duration: f32, curve: Curve) -> Self {
		Easing {
			enabled: true,
			duration,
			curve,
			elapsed: 0.0,
		}
	}
	/// Easing that always reports full progress
	pub fn instant() -> Self {
		Easing {
			enabled: false,
			..Default::default()
		}
	}

	fn duration(&self) -> f32 {
		self.duration.max(0.0)
	}

	/// Restart from zero, or jump to the end when disabled.
	pub fn start(&mut self) {
		self.elapsed = if self.enabled { 0.0 } else { self.duration() };
	}
	pub fn stop(&mut self) {
		self.elapsed = self.duration();
	}
	pub fn advance(&mut self, delta: f32) {
		self.elapsed = (self.elapsed + delta).clamp(0.0, self.duration());
	}
	pub fn is_playing(&self) -> bool {
		self.elapsed < self.duration()
	}
	pub fn elapsed(&self) -> f32 {
		self.elapsed
	}

	/// Elapsed time as a fraction of the duration, without the curve.
	pub fn linear_progress(&self) -> f32 {
		let duration = self.duration();
		if duration < MIN_DURATION {
			return 1.0;
		}
		self.elapsed
			.map_range(0.0..duration, 0.0..1.0)
			.clamp(0.0, 1.0)
	}
	pub fn progress(&self) -> f32 {
		let t = self.linear_progress();
		if self.curve.is_linear() {
			t
		} else {
			self.curve.apply(t).clamp(0.0, 1.0)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn progress_is_monotonic_and_saturates() {
		for curve in [Curve::Linear, Curve::EaseInOutCubic, Curve::EaseOutQuart] {
			let mut easing = Easing::new(1.0, curve);
			easing.start();
			let mut last = easing.progress();
			assert_eq!(last, 0.0);
			for _ in 0..20 {
				easing.advance(0.1);
				let progress = easing.progress();
				assert!(progress >= last);
				assert!(progress <= 1.0);
				last = progress;
			}
			assert_eq!(last, 1.0);
			assert!(!easing.is_playing());
		}
	}

	#[test]
	fn disabled_is_instant() {
		let mut easing = Easing::instant();
		easing.start();
		assert!(!easing.is_playing());
		assert_eq!(easing.progress(), 1.0);
	}

	#[test]
	fn zero_duration_is_complete() {
		let mut easing = Easing::new(0.0, Curve::Linear);
		easing.start();
		assert!(!easing.is_playing());
		assert_eq!(easing.progress(), 1.0);

		let mut easing = Easing::new(-2.0, Curve::EaseInQuad);
		easing.start();
		easing.advance(0.5);
		assert_eq!(easing.progress(), 1.0);
	}

	#[test]
	fn advance_clamps() {
		let mut easing = Easing::new(0.5, Curve::Linear);
		easing.start();
		easing.advance(-1.0);
		assert_eq!(easing.elapsed(), 0.0);
		easing.advance(0.25);
		assert_eq!(easing.progress(), 0.5);
		easing.advance(10.0);
		assert_eq!(easing.elapsed(), 0.5);
	}

	#[test]
	fn keyframe_curve() {
		let curve = Curve::Keyframes(vec![
			Keyframe {
				time: 0.0,
				value: 0.0,
			},
			Keyframe {
				time: 0.5,
				value: 0.8,
			},
			Keyframe {
				time: 1.0,
				value: 1.0,
			},
		]);
		assert!(!curve.is_linear());
		assert!((curve.apply(0.25) - 0.4).abs() < 1e-6);
		assert!((curve.apply(0.75) - 0.9).abs() < 1e-6);
		assert_eq!(curve.apply(2.0), 1.0);
	}

	#[test]
	fn bezier_endpoints() {
		let curve = Curve::CubicBezier(0.42, 0.0, 0.58, 1.0);
		assert_eq!(curve.apply(0.0), 0.0);
		assert_eq!(curve.apply(1.0), 1.0);
		assert!((curve.apply(0.5) - 0.5).abs() < 1e-3);
		assert!(Curve::CubicBezier(0.3, 0.3, 0.7, 0.7).is_linear());
	}

	#[test]
	fn deserializes_without_runtime_state() {
		let easing: Easing =
			serde_json::from_str(r#"{ "enabled": true, "duration": 0.2, "curve": "ease_out_quad" }"#)
				.unwrap();
		assert_eq!(easing.curve, Curve::EaseOutQuad);
		assert_eq!(easing.elapsed(), 0.0);
	}
}
