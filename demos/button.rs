use color_eyre::eyre::Result;
use glam::{Quat, Vec3};
use interactable_molecules::{
	host::{Host, Renderer, SingleHost, Transform},
	receiver::ReceiverRegistry,
	theme::ThemeRegistry,
	value::Color,
	Interactable,
};
use manifest_dir_macros::directory_relative_path;
use rustc_hash::FxHashMap;
use std::{path::Path, time::Duration};
use tracing_subscriber::EnvFilter;

const FRAME_TIME: f32 = 1.0 / 60.0;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
	color_eyre::install()?;
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.init();

	let config =
		tokio::fs::read_to_string(Path::new(directory_relative_path!("res")).join("button.json"))
			.await?;
	let mut button = Interactable::from_json(
		&config,
		&ThemeRegistry::with_defaults(),
		&ReceiverRegistry::with_defaults(),
	)?;
	let mut model = ButtonModel::default();

	let mut interval = tokio::time::interval(Duration::from_secs_f32(FRAME_TIME));
	for (frame, conditions) in script().into_iter().enumerate() {
		interval.tick().await;
		button.update(&conditions, FRAME_TIME, &mut SingleHost(&mut model));

		while let Some(event) = button.try_recv_event() {
			println!(
				"frame {frame}: {} (state {}, dimension {})",
				event.name,
				button.state().name,
				button.dimension_index()
			);
		}
	}
	println!(
		"final color {:?}, position {:?}",
		model.colors.get("_Color"),
		model.position
	);
	Ok(())
}

/// Per frame [focus, press] input: hover, click, hold, leave.
fn script() -> Vec<[bool; 2]> {
	let mut frames = Vec::new();
	frames.extend([[false, false]; 10]);
	frames.extend([[true, false]; 30]);
	frames.extend([[true, true]; 10]);
	frames.extend([[true, false]; 20]);
	frames.extend([[true, true]; 80]);
	frames.extend([[true, false]; 10]);
	frames.extend([[false, false]; 30]);
	frames
}

#[derive(Default)]
struct ButtonModel {
	colors: FxHashMap<String, Color>,
	position: Vec3,
	scale: Vec3,
	rotation: Quat,
}
impl Renderer for ButtonModel {
	fn color(&self, property: &str) -> Option<Color> {
		Some(self.colors.get(property).copied().unwrap_or_default())
	}
	fn set_color(&mut self, property: &str, color: Color) {
		self.colors.insert(property.to_string(), color);
	}
}
impl Transform for ButtonModel {
	fn position(&self) -> Vec3 {
		self.position
	}
	fn set_position(&mut self, position: Vec3) {
		self.position = position;
	}
	fn scale(&self) -> Vec3 {
		self.scale
	}
	fn set_scale(&mut self, scale: Vec3) {
		self.scale = scale;
	}
	fn rotation(&self) -> Quat {
		self.rotation
	}
	fn set_rotation(&mut self, rotation: Quat) {
		self.rotation = rotation;
	}
}
impl Host for ButtonModel {
	fn renderer(&mut self) -> Option<&mut dyn Renderer> {
		Some(self)
	}
	fn transform(&mut self) -> Option<&mut dyn Transform> {
		Some(self)
	}
}
