pub mod app;
pub mod config;
pub mod display;
pub mod format;
pub mod logging;
pub mod render;
pub mod shutdown;
pub mod system;
