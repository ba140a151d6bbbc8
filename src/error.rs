use thiserror::Error;

/// Errors raised while building or validating configuration.
///
/// Nothing in the per-frame update path returns these.
#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("Failed to parse configuration: {0}")]
	Json(#[from] serde_json::Error),

	#[error("State catalogue is empty")]
	EmptyCatalogue,

	#[error("States {first:?} and {second:?} share bit {bit}")]
	DuplicateBit {
		first: String,
		second: String,
		bit: u32,
	},

	#[error("State {state:?} has bit {bit}, which is not a power of two")]
	InvalidBit { state: String, bit: u32 },

	#[error("State {state:?} has index {index}, expected {expected}")]
	StateIndex {
		state: String,
		index: usize,
		expected: usize,
	},

	#[error("Rule or fallback refers to state index {0}, which does not exist")]
	RuleState(usize),

	#[error("Unknown theme kind {0:?}")]
	UnknownTheme(String),

	#[error("Theme property {property:?} has {values} values for {states} states")]
	StateCountMismatch {
		property: String,
		values: usize,
		states: usize,
	},

	#[error("Theme property {property:?} expects {expected:?} values, got {found:?}")]
	ValueTypeMismatch {
		property: String,
		expected: crate::value::ValueType,
		found: crate::value::ValueType,
	},

	#[error("Unknown receiver kind {0:?}")]
	UnknownReceiver(String),

	#[error("Receiver {kind:?} could not be built: {reason}")]
	InvalidReceiver { kind: String, reason: String },

	#[error("Interactable needs at least one dimension")]
	NoDimensions,
}

pub type Result<T> = std::result::Result<T, ConfigError>;
