//! GUI module - egui launcher window and its dialogs

mod app;
mod components;
mod constants;
mod fonts;
mod geometry;

pub use app::{LaunchOptions, run_gui};
