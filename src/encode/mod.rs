/// Encoders and encode options.
pub mod codec;
/// Output containers and their capabilities.
pub mod format;
/// Atomic file writes.
pub mod save;
