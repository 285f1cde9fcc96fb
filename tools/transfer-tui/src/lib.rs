//! Cube Transfer terminal client
//!
//! Keyboard front end for the `transfer-flow` runtime. Key presses become
//! flow commands; every published view model is re-rendered.
//!
//! ```text
//! crossterm keys ──App::handle_key──→ FlowHandle ──→ FlowRuntime
//!                                                        │
//! ratatui frame ←──ui::render←── App::apply_view ←── display bus
//! ```

pub mod app;
pub mod demo;
pub mod ui;

pub use app::{App, InputMode};
