//! Terminal driver: wires stdin, the pure core and the engine together.

mod app;
pub mod config;
mod console;
mod effects;
mod events;
pub mod logging;
mod persistence;

pub use app::run_app;
