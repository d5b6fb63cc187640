//! Hosts that drive the engine: an interactive terminal UI and a headless
//! replay of scripted moves.

mod app;
mod game_view;
pub mod replay;

pub use app::App;
