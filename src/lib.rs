pub mod easing;
mod error;
pub mod host;
mod interactable;
pub mod receiver;
pub mod scheduler;
pub mod state;
pub mod theme;
pub mod value;

pub use error::*;
pub use interactable::*;
