// Tue Jan 13 2026 - Alex

use crate::aggregate::{verify_struct_layout, verify_union_layout};
use crate::config::Config;
use crate::report::{ReportError, ReportSink};
use crate::string::{
    probe_custom_alloc_string, probe_default_string, probe_sweep, threshold_fact, AllocatorDescriptor,
    CustomAllocString, DefaultString, NativeStringKind, ProbeError, StringProbeResult,
};
use log::{error, info};

/// Runs every probe once and hands the facts to the sink. Probe failures are
/// reported, never propagated.
pub struct Harness {
    config: Config,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub probes: usize,
    pub failed_probes: usize,
    pub assertions: usize,
    pub failed_assertions: usize,
}

impl RunSummary {
    pub fn all_passed(&self) -> bool {
        self.failed_probes == 0 && self.failed_assertions == 0
    }
}

impl Harness {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn run(&self, sink: &mut dyn ReportSink) -> Result<RunSummary, ReportError> {
        let mut summary = RunSummary::default();
        let descriptor = AllocatorDescriptor::fixed_state();
        info!("Probing with {} appended characters", self.config.append_count);

        self.report_threshold::<DefaultString>(sink, &mut summary)?;
        self.report_threshold::<CustomAllocString>(sink, &mut summary)?;

        let default = probe_default_string(self.config.append_count);
        self.report_probe(sink, &mut summary, DefaultString::TYPE_NAME, default)?;

        let custom = probe_custom_alloc_string(&descriptor, self.config.append_count);
        self.report_probe(sink, &mut summary, CustomAllocString::TYPE_NAME, custom)?;

        if !self.config.sweep_counts.is_empty() {
            self.report_sweep::<DefaultString>(sink, &mut summary, None)?;
            self.report_sweep::<CustomAllocString>(sink, &mut summary, Some(&descriptor))?;
        }

        for assertion in [verify_struct_layout(), verify_union_layout()] {
            summary.assertions += 1;
            if !assertion.holds() {
                summary.failed_assertions += 1;
            }
            sink.layout_assertion(&assertion)?;
        }

        sink.finish()?;
        Ok(summary)
    }

    fn report_threshold<K: NativeStringKind>(
        &self,
        sink: &mut dyn ReportSink,
        summary: &mut RunSummary,
    ) -> Result<(), ReportError> {
        match threshold_fact::<K>(self.config.threshold_limit, self.config.append_count) {
            Ok(fact) => sink.threshold(&fact),
            Err(e) => self.report_failure(sink, summary, K::TYPE_NAME, &e),
        }
    }

    fn report_probe(
        &self,
        sink: &mut dyn ReportSink,
        summary: &mut RunSummary,
        subject: &str,
        result: Result<StringProbeResult, ProbeError>,
    ) -> Result<(), ReportError> {
        match result {
            Ok(result) => {
                summary.probes += 1;
                if result.decoded.is_none() || result.heap_decode_failed() {
                    summary.failed_probes += 1;
                }
                sink.string_probe(&result)
            }
            Err(e) => self.report_failure(sink, summary, subject, &e),
        }
    }

    fn report_sweep<K: NativeStringKind>(
        &self,
        sink: &mut dyn ReportSink,
        summary: &mut RunSummary,
        descriptor: Option<&AllocatorDescriptor>,
    ) -> Result<(), ReportError> {
        match probe_sweep::<K>(&self.config.sweep_counts, descriptor) {
            Ok(results) => {
                for result in results {
                    summary.probes += 1;
                    if result.heap_decode_failed() {
                        summary.failed_probes += 1;
                    }
                    sink.string_probe(&result)?;
                }
                Ok(())
            }
            Err(e) => self.report_failure(sink, summary, K::TYPE_NAME, &e),
        }
    }

    fn report_failure(
        &self,
        sink: &mut dyn ReportSink,
        summary: &mut RunSummary,
        subject: &str,
        e: &ProbeError,
    ) -> Result<(), ReportError> {
        error!("{}: {}", subject, e);
        summary.probes += 1;
        summary.failed_probes += 1;
        sink.probe_failed(subject, e)
    }
}
