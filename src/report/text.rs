// Tue Jan 13 2026 - Alex

use crate::aggregate::LayoutAssertion;
use crate::report::{ReportError, ReportSink};
use crate::string::{ProbeError, StringProbeResult, ThresholdFact};
use crate::utils::binary::hex_dump;
use colored::*;
use std::io::Write;

const SEPARATOR: &str = "-----------";

/// Plain-text rendering, one block per probe.
pub struct TextSink<W: Write> {
    out: W,
    use_color: bool,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, use_color: true }
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn verdict(&self, ok: bool) -> String {
        match (ok, self.use_color) {
            (true, true) => "ok".green().bold().to_string(),
            (false, true) => "MISMATCH".red().bold().to_string(),
            (true, false) => "ok".to_string(),
            (false, false) => "MISMATCH".to_string(),
        }
    }

    fn heading(&self, text: &str) -> String {
        if self.use_color {
            text.cyan().bold().to_string()
        } else {
            text.to_string()
        }
    }
}

impl<W: Write> ReportSink for TextSink<W> {
    fn string_probe(&mut self, r: &StringProbeResult) -> Result<(), ReportError> {
        let heading = self.heading(r.type_name);
        let size_verdict = self.verdict(r.size_gate_passed());

        writeln!(self.out, "{} [{}]", heading, r.abi_family)?;
        writeln!(self.out, "size: {} -> {} {}", r.declared_size, r.candidate_size, size_verdict)?;
        writeln!(self.out, "len: {}", r.reported_len)?;
        writeln!(self.out, "data: {:#x}", r.data_ptr)?;
        writeln!(self.out, "mode: {}", r.mode)?;
        writeln!(self.out, "in_place: {}", hex_dump(&r.in_place))?;

        match r.decoded {
            Some(decoded) => {
                if let Some(state) = decoded.alloc_state {
                    let verdict = self.verdict(r.alloc_state_confirmed.unwrap_or(false));
                    writeln!(self.out, "alloc: {:#x} {}", state, verdict)?;
                }
                writeln!(self.out, "heap: {:#x} {} {}", decoded.ptr, decoded.len, decoded.capacity)?;
                let verdict = self.verdict(r.fields_confirmed);
                writeln!(self.out, "fields: {}", verdict)?;
            }
            None => writeln!(self.out, "heap: not decoded")?,
        }

        writeln!(self.out, "{}", SEPARATOR)?;
        Ok(())
    }

    fn threshold(&mut self, fact: &ThresholdFact) -> Result<(), ReportError> {
        let verdict = self.verdict(fact.append_count_exceeds());
        match fact.in_place_capacity {
            Some(cap) => writeln!(
                self.out,
                "small buffer of {}: {} chars, append count {} {}",
                fact.type_name, cap, fact.append_count, verdict
            )?,
            None => writeln!(
                self.out,
                "small buffer of {}: not exceeded within {} chars {}",
                fact.type_name, fact.limit, verdict
            )?,
        }
        Ok(())
    }

    fn layout_assertion(&mut self, a: &LayoutAssertion) -> Result<(), ReportError> {
        let verdict = self.verdict(a.holds());
        writeln!(
            self.out,
            "sizeof({}): mirror {} native {} {}",
            a.name, a.mirror_size, a.native_size, verdict
        )?;
        writeln!(self.out, "alignof({}): mirror {} native {}", a.name, a.mirror_align, a.native_align)?;
        for (field, offset) in &a.mirror_offsets {
            writeln!(self.out, "  {:<20} @ 0x{:02X}", field, offset)?;
        }
        Ok(())
    }

    fn probe_failed(&mut self, subject: &str, error: &ProbeError) -> Result<(), ReportError> {
        let verdict = self.verdict(false);
        writeln!(self.out, "{}: {} ({})", subject, verdict, error)?;
        writeln!(self.out, "{}", SEPARATOR)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ReportError> {
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::verify_struct_layout;
    use crate::string::{probe_default_string, AbiFamily, DecodedHeap, StorageMode};

    fn render<F: FnOnce(&mut TextSink<Vec<u8>>)>(f: F) -> String {
        let mut sink = TextSink::new(Vec::new()).with_color(false);
        f(&mut sink);
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn test_string_probe_block() {
        let result = StringProbeResult {
            type_name: "std::string",
            abi_family: AbiFamily::LibStdCxx,
            declared_size: 32,
            candidate_size: 32,
            appended: 55,
            reported_len: 55,
            data_ptr: 0x1000,
            object_addr: 0x2000,
            mode: StorageMode::Heap,
            in_place: vec![0xAB; 16],
            decoded: Some(DecodedHeap {
                ptr: 0x1000,
                len: 55,
                capacity: 55,
                alloc_state: Some(0xFAFA),
            }),
            fields_confirmed: true,
            alloc_state_confirmed: Some(true),
        };

        let text = render(|sink| sink.string_probe(&result).unwrap());
        assert!(text.contains("size: 32 -> 32 ok"));
        assert!(text.contains("len: 55"));
        assert!(text.contains("in_place: ABABABABABABABAB ABABABABABABABAB"));
        assert!(text.contains("alloc: 0xfafa ok"));
        assert!(text.contains("heap: 0x1000 55 55"));
        assert!(text.ends_with("-----------\n"));
    }

    #[test]
    fn test_live_probe_renders() {
        let result = probe_default_string(55).unwrap();
        let text = render(|sink| sink.string_probe(&result).unwrap());
        assert!(text.contains("len: 55"));
        assert!(!text.contains("alloc:"));
    }

    #[test]
    fn test_assertion_and_failure_lines() {
        let assertion = verify_struct_layout();
        let text = render(|sink| {
            sink.layout_assertion(&assertion).unwrap();
            sink.probe_failed("std::string", &ProbeError::NativeAllocation("std::string")).unwrap();
        });
        assert!(text.contains("sizeof(RootStruct): mirror 36 native 36 ok"));
        assert!(text.contains("value_end"));
        assert!(text.contains("std::string: MISMATCH (Native allocation failed for std::string)"));
    }
}
