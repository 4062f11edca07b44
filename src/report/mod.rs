// Tue Jan 13 2026 - Alex

pub mod text;
pub mod json;
pub mod error;

pub use text::TextSink;
pub use json::JsonSink;
pub use error::ReportError;

use crate::aggregate::LayoutAssertion;
use crate::string::{ProbeError, StringProbeResult, ThresholdFact};

/// Receives layout facts as the probes produce them.
pub trait ReportSink {
    fn string_probe(&mut self, result: &StringProbeResult) -> Result<(), ReportError>;
    fn threshold(&mut self, fact: &ThresholdFact) -> Result<(), ReportError>;
    fn layout_assertion(&mut self, assertion: &LayoutAssertion) -> Result<(), ReportError>;
    fn probe_failed(&mut self, subject: &str, error: &ProbeError) -> Result<(), ReportError>;

    fn finish(&mut self) -> Result<(), ReportError> {
        Ok(())
    }
}
