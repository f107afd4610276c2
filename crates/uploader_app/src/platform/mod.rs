//! Terminal host for the upload widget: input translation, effects and rendering.
mod app;
mod config;
mod effects;
mod host;
mod logging;
mod ui;

pub use app::run_app;
