// Tue Jan 13 2026 - Alex

use crate::aggregate::LayoutAssertion;
use crate::report::{ReportError, ReportSink};
use crate::string::{ProbeError, StringProbeResult, ThresholdFact};
use serde_json::{json, Value};
use std::io::Write;

/// Collects every fact and writes a single JSON document on `finish`.
pub struct JsonSink<W: Write> {
    out: W,
    pretty_print: bool,
    strings: Vec<Value>,
    thresholds: Vec<Value>,
    aggregates: Vec<Value>,
    failures: Vec<Value>,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            pretty_print: true,
            strings: Vec::new(),
            thresholds: Vec::new(),
            aggregates: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn document(&self) -> Value {
        json!({
            "abi_family": crate::string::AbiFamily::ACTIVE,
            "pointer_width": std::mem::size_of::<usize>(),
            "strings": self.strings,
            "thresholds": self.thresholds,
            "aggregates": self.aggregates,
            "failures": self.failures,
        })
    }
}

impl<W: Write> ReportSink for JsonSink<W> {
    fn string_probe(&mut self, result: &StringProbeResult) -> Result<(), ReportError> {
        let mut value = serde_json::to_value(result)?;
        value["size_gate_passed"] = json!(result.size_gate_passed());
        self.strings.push(value);
        Ok(())
    }

    fn threshold(&mut self, fact: &ThresholdFact) -> Result<(), ReportError> {
        let mut value = serde_json::to_value(fact)?;
        value["append_count_exceeds"] = json!(fact.append_count_exceeds());
        self.thresholds.push(value);
        Ok(())
    }

    fn layout_assertion(&mut self, assertion: &LayoutAssertion) -> Result<(), ReportError> {
        let mut value = serde_json::to_value(assertion)?;
        value["holds"] = json!(assertion.holds());
        value["alignment_matches"] = json!(assertion.alignment_matches());
        self.aggregates.push(value);
        Ok(())
    }

    fn probe_failed(&mut self, subject: &str, error: &ProbeError) -> Result<(), ReportError> {
        self.failures.push(json!({ "subject": subject, "error": error.to_string() }));
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ReportError> {
        let doc = self.document();
        if self.pretty_print {
            serde_json::to_writer_pretty(&mut self.out, &doc)?;
        } else {
            serde_json::to_writer(&mut self.out, &doc)?;
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::verify_union_layout;
    use crate::string::{probe_custom_alloc_string, AllocatorDescriptor, FIXED_ALLOC_STATE};

    #[test]
    fn test_document_shape() {
        let desc = AllocatorDescriptor::fixed_state();
        let probe = probe_custom_alloc_string(&desc, 55).unwrap();

        let mut sink = JsonSink::new(Vec::new()).with_pretty_print(false);
        sink.string_probe(&probe).unwrap();
        sink.layout_assertion(&verify_union_layout()).unwrap();
        sink.finish().unwrap();

        let doc: Value = serde_json::from_slice(&sink.into_inner()).unwrap();
        let string = &doc["strings"][0];
        assert_eq!(string["reported_len"], 55);
        assert_eq!(string["mode"], "heap");
        assert_eq!(string["size_gate_passed"], true);
        assert_eq!(string["decoded"]["alloc_state"], FIXED_ALLOC_STATE);
        assert!(string["in_place"].as_str().unwrap().contains(' '));
        assert_eq!(doc["aggregates"][0]["holds"], true);
        assert!(doc["failures"].as_array().unwrap().is_empty());
    }
}
