// Typed event union and per-event property bags
pub mod event;
pub mod properties;

pub use event::Event;
pub use properties::*;
