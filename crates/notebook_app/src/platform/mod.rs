mod app;
mod canvas;
mod effects;
mod host;
mod logging;
mod render;
mod settings;

pub use app::run_app;
pub use logging::LogDestination;
