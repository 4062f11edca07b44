// Tue Jan 13 2026 - Alex

pub mod binary;
pub mod logging;

pub use binary::BinaryUtils;
pub use logging::LoggingUtils;
