use glam::{Quat, Vec3};
use interactable_molecules::{
	easing::{Curve, Easing},
	host::{Host, Renderer, SingleHost, Transform},
	receiver::ReceiverRegistry,
	state::{DefaultState, StateCatalogue},
	theme::{Theme, ThemeProperty, ThemeRegistry},
	value::{Color, ThemeValue, ValueType},
	ConfigError, Interactable, InteractableConfig, InteractableSettings, Profile,
};
use rustc_hash::FxHashMap;

const IDLE: [bool; 2] = [false, false];
const FOCUS: [bool; 2] = [true, false];
const PRESS: [bool; 2] = [true, true];

#[derive(Default)]
struct Panel {
	color: Option<Color>,
	position: Vec3,
	scale: Vec3,
}
impl Renderer for Panel {
	fn color(&self, _property: &str) -> Option<Color> {
		self.color
	}
	fn set_color(&mut self, _property: &str, color: Color) {
		self.color = Some(color);
	}
}
impl Transform for Panel {
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
		Quat::IDENTITY
	}
	fn set_rotation(&mut self, _rotation: Quat) {}
}
impl Host for Panel {
	fn renderer(&mut self) -> Option<&mut dyn Renderer> {
		Some(self)
	}
	fn transform(&mut self) -> Option<&mut dyn Transform> {
		Some(self)
	}
}

fn solid_color(name: &str, color: Color) -> Theme {
	Theme {
		name: name.into(),
		kind: "color".into(),
		properties: vec![ThemeProperty {
			name: "Color".into(),
			value_type: ValueType::Color,
			values: vec![ThemeValue::Color(color); 4],
			shader_property: None,
		}],
		easing: Easing::instant(),
	}
}
fn growing_scale(easing: Easing) -> Theme {
	Theme {
		name: "grow".into(),
		kind: "scale".into(),
		properties: vec![ThemeProperty {
			name: "Scale".into(),
			value_type: ValueType::Vector3,
			values: [1.0, 2.0, 3.0, 0.5]
				.into_iter()
				.map(|s| ThemeValue::Vector3(Vec3::splat(s)))
				.collect(),
			shader_property: None,
		}],
		easing,
	}
}
fn press_depth(name: &str, focus: f32, press: f32) -> Theme {
	Theme {
		name: name.into(),
		kind: "offset".into(),
		properties: vec![ThemeProperty {
			name: "Offset".into(),
			value_type: ValueType::Vector3,
			values: [0.0, focus, press, 0.0]
				.into_iter()
				.map(|z| ThemeValue::Vector3(Vec3::new(0.0, 0.0, z)))
				.collect(),
			shader_property: None,
		}],
		easing: Easing::instant(),
	}
}
fn create(settings: InteractableSettings, profiles: Vec<Profile>) -> Interactable {
	Interactable::create(
		InteractableConfig {
			states: StateCatalogue::default(),
			settings,
			profiles,
			receivers: Vec::new(),
		},
		&ThemeRegistry::with_defaults(),
		&ReceiverRegistry::with_defaults(),
	)
	.unwrap()
}

#[test]
fn bundled_button_config() {
	let mut button = Interactable::from_json(
		include_str!("../res/button.json"),
		&ThemeRegistry::with_defaults(),
		&ReceiverRegistry::with_defaults(),
	)
	.unwrap();
	assert_eq!(button.dimensions(), 2);

	let mut panel = Panel::default();
	let mut events = Vec::new();
	for conditions in [IDLE, FOCUS, PRESS, FOCUS] {
		button.update(&conditions, 0.1, &mut SingleHost(&mut panel));
		if conditions == IDLE {
			assert_eq!(panel.color, Some(Color::rgba(0.8, 0.8, 0.8, 1.0)));
			assert_eq!(panel.position, Vec3::ZERO);
		}
		while let Some(event) = button.try_recv_event() {
			events.push(event.name);
		}
	}
	assert_eq!(events, vec!["pressed", "clicked", "hover_start", "released"]);

	// the click toggled into the second dimension, which snaps to its focus color
	assert_eq!(button.dimension_index(), 1);
	assert_eq!(panel.color, Some(Color::rgba(0.4, 0.8, 1.0, 1.0)));
	assert_eq!(panel.position, Vec3::ZERO);
}

#[test]
fn config_survives_json() {
	let config = InteractableConfig {
		states: StateCatalogue::default(),
		settings: InteractableSettings {
			dimensions: 2,
			..Default::default()
		},
		profiles: vec![Profile {
			target: "panel".into(),
			themes: vec![
				vec![growing_scale(Easing::new(0.3, Curve::EaseInOutQuad))],
				vec![solid_color("toggled", Color::BLACK)],
			],
		}],
		receivers: Vec::new(),
	};
	let json = serde_json::to_string(&config).unwrap();
	assert_eq!(InteractableConfig::from_json(&json).unwrap(), config);
}

#[test]
fn malformed_json_is_an_error() {
	let result = Interactable::from_json(
		"{ \"settings\": ",
		&ThemeRegistry::with_defaults(),
		&ReceiverRegistry::with_defaults(),
	);
	assert!(matches!(result, Err(ConfigError::Json(_))));
}

#[test]
fn theme_eases_with_state() {
	let mut interactable = create(
		InteractableSettings::default(),
		vec![Profile {
			target: "panel".into(),
			themes: vec![vec![growing_scale(Easing::new(1.0, Curve::Linear))]],
		}],
	);
	let mut panel = Panel::default();
	interactable.update(&IDLE, 0.0, &mut SingleHost(&mut panel));
	assert_eq!(panel.scale, Vec3::ONE);

	interactable.update(&FOCUS, 0.0, &mut SingleHost(&mut panel));
	assert_eq!(panel.scale, Vec3::ONE);
	interactable.update(&FOCUS, 0.5, &mut SingleHost(&mut panel));
	assert_eq!(panel.scale, Vec3::splat(1.5));
	interactable.update(&FOCUS, 0.5, &mut SingleHost(&mut panel));
	assert_eq!(panel.scale, Vec3::splat(2.0));
}

#[test]
fn disabled_theme_wins_over_press() {
	let mut interactable = create(
		InteractableSettings {
			enabled: false,
			..Default::default()
		},
		vec![Profile {
			target: "panel".into(),
			themes: vec![vec![growing_scale(Easing::instant())]],
		}],
	);
	let mut panel = Panel::default();
	interactable.update(&PRESS, 0.1, &mut SingleHost(&mut panel));
	assert!(DefaultState::Disabled.is(interactable.state()));
	assert_eq!(panel.scale, Vec3::splat(0.5));

	interactable.set_enabled(true);
	interactable.update(&PRESS, 0.1, &mut SingleHost(&mut panel));
	assert_eq!(panel.scale, Vec3::splat(3.0));
}

#[test]
fn click_switches_theme_set() {
	let red = Color::rgba(1.0, 0.0, 0.0, 1.0);
	let blue = Color::rgba(0.0, 0.0, 1.0, 1.0);
	let mut interactable = create(
		InteractableSettings {
			dimensions: 2,
			..Default::default()
		},
		vec![Profile {
			target: "panel".into(),
			themes: vec![
				vec![solid_color("off", red)],
				vec![solid_color("on", blue)],
			],
		}],
	);
	let mut panel = Panel::default();
	interactable.update(&FOCUS, 0.1, &mut SingleHost(&mut panel));
	interactable.update(&PRESS, 0.1, &mut SingleHost(&mut panel));
	assert_eq!(panel.color, Some(red));
	interactable.update(&FOCUS, 0.1, &mut SingleHost(&mut panel));
	assert_eq!(interactable.dimension_index(), 1);
	assert_eq!(panel.color, Some(blue));

	interactable.update(&PRESS, 0.1, &mut SingleHost(&mut panel));
	interactable.update(&FOCUS, 0.1, &mut SingleHost(&mut panel));
	assert_eq!(interactable.dimension_index(), 0);
	assert_eq!(panel.color, Some(red));
}

#[test]
fn profiles_resolve_their_own_hosts() {
	let mut interactable = create(
		InteractableSettings::default(),
		vec![
			Profile {
				target: "panel".into(),
				themes: vec![vec![growing_scale(Easing::instant())]],
			},
			Profile {
				target: "missing".into(),
				themes: vec![vec![solid_color("ghost", Color::BLACK)]],
			},
		],
	);
	let mut hosts: FxHashMap<String, Box<dyn Host>> = FxHashMap::default();
	hosts.insert("panel".into(), Box::new(Panel::default()));
	interactable.update(&PRESS, 0.1, &mut hosts);

	let panel = hosts.get_mut("panel").unwrap();
	assert_eq!(
		panel.transform().map(|t| t.scale()),
		Some(Vec3::splat(3.0))
	);
	assert_eq!(panel.renderer().and_then(|r| r.color("_Color")), None);
}

#[test]
fn dimensions_share_the_host_origin() {
	let mut interactable = create(
		InteractableSettings {
			dimensions: 2,
			..Default::default()
		},
		vec![Profile {
			target: "panel".into(),
			themes: vec![
				vec![press_depth("off", 0.0, -0.5)],
				vec![press_depth("on", 0.25, -1.0)],
			],
		}],
	);
	let mut panel = Panel {
		position: Vec3::new(1.0, 2.0, 3.0),
		..Default::default()
	};
	interactable.update(&FOCUS, 0.1, &mut SingleHost(&mut panel));
	interactable.update(&PRESS, 0.1, &mut SingleHost(&mut panel));
	assert_eq!(panel.position, Vec3::new(1.0, 2.0, 2.5));

	// the toggling release hands over to the second set while pressed deep
	interactable.update(&FOCUS, 0.1, &mut SingleHost(&mut panel));
	assert_eq!(interactable.dimension_index(), 1);
	assert_eq!(panel.position, Vec3::new(1.0, 2.0, 3.25));

	interactable.update(&PRESS, 0.1, &mut SingleHost(&mut panel));
	assert_eq!(panel.position, Vec3::new(1.0, 2.0, 2.0));
}
