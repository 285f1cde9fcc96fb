//! Adapters implementing the outbound ports

pub mod clipboard;
pub mod clock;
pub mod display_bus;
pub mod scheduler;

pub use clipboard::InMemoryClipboard;
pub use clock::{FixedClock, SystemClock};
pub use display_bus::InMemoryDisplayBus;
pub use scheduler::{ManualScheduler, TokioScheduler};
