// Tue Jan 13 2026 - Alex

pub mod banner;

pub use banner::Banner;
