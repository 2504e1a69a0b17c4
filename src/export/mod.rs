/// Exporter configuration and environment overrides.
pub mod config;
/// Render requests and batch jobs.
pub mod request;
/// The export state machine.
pub mod session;
