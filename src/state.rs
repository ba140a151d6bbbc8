use crate::error::{ConfigError, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// A named, bit-tagged interaction state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State {
	pub name: String,
	pub index: usize,
	pub bit: u32,
}
impl State {
	pub fn new(name: impl Into<String>, index: usize, bit: u32) -> Self {
		State {
			name: name.into(),
			index,
			bit,
		}
	}
}

/// The four states of the built-in catalogue, in index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefaultState {
	Default,
	Focus,
	Press,
	Disabled,
}
impl DefaultState {
	pub const ALL: [DefaultState; 4] = [
		DefaultState::Default,
		DefaultState::Focus,
		DefaultState::Press,
		DefaultState::Disabled,
	];

	pub fn index(self) -> usize {
		self as usize
	}
	pub fn bit(self) -> u32 {
		match self {
			DefaultState::Default => 0,
			DefaultState::Focus => 1 << 0,
			DefaultState::Press => 1 << 1,
			DefaultState::Disabled => 1 << 2,
		}
	}
	pub fn name(self) -> &'static str {
		match self {
			DefaultState::Default => "Default",
			DefaultState::Focus => "Focus",
			DefaultState::Press => "Press",
			DefaultState::Disabled => "Disabled",
		}
	}
	/// Condition mask the built-in rule table resolves to this state.
	pub fn conditions(self) -> u32 {
		match self {
			DefaultState::Press => DefaultState::Focus.bit() | DefaultState::Press.bit(),
			_ => self.bit(),
		}
	}
	/// Matches by bit, so catalogues may list the states in any order.
	pub fn is(self, state: &State) -> bool {
		state.bit == self.bit()
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleMatch {
	/// The mask must equal the rule mask
	#[default]
	Exact,
	/// The mask must be numerically at least the rule mask
	AtLeast,
}

/// Maps a condition mask to a state. Rules are checked in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRule {
	pub state: usize,
	pub mask: u32,
	#[serde(default)]
	pub matching: RuleMatch,
}
impl StateRule {
	pub fn exact(state: usize, mask: u32) -> Self {
		StateRule {
			state,
			mask,
			matching: RuleMatch::Exact,
		}
	}
	pub fn at_least(state: usize, mask: u32) -> Self {
		StateRule {
			state,
			mask,
			matching: RuleMatch::AtLeast,
		}
	}
	pub fn matches(&self, mask: u32) -> bool {
		match self.matching {
			RuleMatch::Exact => mask == self.mask,
			RuleMatch::AtLeast => mask >= self.mask,
		}
	}
}

/// Serializable description of a state model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateCatalogue {
	pub states: Vec<State>,
	pub rules: Vec<StateRule>,
	#[serde(default)]
	pub fallback: usize,
}
impl Default for StateCatalogue {
	fn default() -> Self {
		let states = DefaultState::ALL
			.iter()
			.map(|s| State::new(s.name(), s.index(), s.bit()))
			.collect();
		let rules = vec![
			StateRule::at_least(
				DefaultState::Disabled.index(),
				DefaultState::Disabled.bit(),
			),
			StateRule::exact(
				DefaultState::Press.index(),
				DefaultState::Focus.bit() | DefaultState::Press.bit(),
			),
			StateRule::exact(DefaultState::Focus.index(), DefaultState::Focus.bit()),
		];
		StateCatalogue {
			states,
			rules,
			fallback: DefaultState::Default.index(),
		}
	}
}

/// Combine a condition vector into a mask, position `i` contributing `1 << i`.
///
/// Positions past 31 do not fit in the mask and are ignored.
pub fn condition_bits(conditions: &[bool]) -> u32 {
	conditions
		.iter()
		.take(u32::BITS as usize)
		.enumerate()
		.filter(|(_, c)| **c)
		.fold(0, |bit, (i, _)| bit | (1 << i))
}

/// Resolves condition vectors to exactly one state.
#[derive(Debug, Clone)]
pub struct StateModel {
	states: Vec<State>,
	rules: Vec<StateRule>,
	fallback: usize,
	current: usize,
	conditions: u32,
}
impl StateModel {
	pub fn new(catalogue: StateCatalogue) -> Result<Self> {
		let StateCatalogue {
			states,
			rules,
			fallback,
		} = catalogue;
		if states.is_empty() {
			return Err(ConfigError::EmptyCatalogue);
		}

		let mut bits: FxHashMap<u32, &str> = FxHashMap::default();
		for (expected, state) in states.iter().enumerate() {
			if state.index != expected {
				return Err(ConfigError::StateIndex {
					state: state.name.clone(),
					index: state.index,
					expected,
				});
			}
			if state.bit != 0 && !state.bit.is_power_of_two() {
				return Err(ConfigError::InvalidBit {
					state: state.name.clone(),
					bit: state.bit,
				});
			}
			if let Some(first) = bits.insert(state.bit, &state.name) {
				return Err(ConfigError::DuplicateBit {
					first: first.to_string(),
					second: state.name.clone(),
					bit: state.bit,
				});
			}
		}
		if fallback >= states.len() {
			return Err(ConfigError::RuleState(fallback));
		}
		if let Some(rule) = rules.iter().find(|r| r.state >= states.len()) {
			return Err(ConfigError::RuleState(rule.state));
		}

		Ok(StateModel {
			states,
			rules,
			fallback,
			current: fallback,
			conditions: 0,
		})
	}

	/// The Default/Focus/Press/Disabled model, conditions ordered `[focus, press, disabled]`.
	pub fn interactable() -> Self {
		let StateCatalogue {
			states,
			rules,
			fallback,
		} = StateCatalogue::default();
		StateModel {
			states,
			rules,
			fallback,
			current: fallback,
			conditions: 0,
		}
	}

	pub fn resolve(&self, conditions: &[bool]) -> &State {
		self.resolve_bits(condition_bits(conditions))
	}
	pub fn resolve_bits(&self, mask: u32) -> &State {
		let index = self
			.rules
			.iter()
			.find(|rule| rule.matches(mask))
			.map(|rule| rule.state)
			.unwrap_or(self.fallback);
		&self.states[index]
	}

	/// Resolve and store the current state. Returns true when it changed.
	pub fn update(&mut self, conditions: &[bool]) -> bool {
		self.update_bits(condition_bits(conditions))
	}
	pub fn update_bits(&mut self, mask: u32) -> bool {
		let index = self.resolve_bits(mask).index;
		let changed = index != self.current;
		if changed {
			trace!(
				from = self.states[self.current].name,
				to = self.states[index].name,
				mask,
				"state resolved"
			);
		}
		self.current = index;
		self.conditions = mask;
		changed
	}

	/// The condition mask last passed to `update`
	pub fn conditions(&self) -> u32 {
		self.conditions
	}

	pub fn current(&self) -> &State {
		&self.states[self.current]
	}
	pub fn states(&self) -> &[State] {
		&self.states
	}
	pub fn state(&self, name: &str) -> Option<&State> {
		self.states.iter().find(|s| s.name == name)
	}
	pub fn len(&self) -> usize {
		self.states.len()
	}
	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}
	pub fn catalogue(&self) -> StateCatalogue {
		StateCatalogue {
			states: self.states.clone(),
			rules: self.rules.clone(),
			fallback: self.fallback,
		}
	}
}
impl Default for StateModel {
	fn default() -> Self {
		StateModel::interactable()
	}
}
