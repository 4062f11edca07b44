// Tue Jan 13 2026 - Alex

pub mod config;
pub mod string;
pub mod aggregate;
pub mod report;
pub mod harness;
pub mod ui;
pub mod utils;

pub use config::{Config, OutputFormat};
pub use string::{StringProbeResult, AllocatorDescriptor, probe_default_string, probe_custom_alloc_string};
pub use aggregate::{LayoutAssertion, verify_struct_layout, verify_union_layout};
pub use report::{ReportSink, TextSink, JsonSink};
pub use harness::{Harness, RunSummary};
