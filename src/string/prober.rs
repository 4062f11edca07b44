// Tue Jan 13 2026 - Alex

use crate::string::allocator::AllocatorDescriptor;
use crate::string::candidate::HeapLayout;
use crate::string::error::ProbeError;
use crate::string::native::{CustomAllocString, DefaultString, NativeString, NativeStringKind};
use crate::string::profile::AbiFamily;
use crate::utils::binary::serialize_hex_grouped;
use crate::utils::logging::scoped_timer;
use log::{debug, warn};
use serde::Serialize;
use std::fmt;

/// Comfortably past every small buffer seen in practice (15, 22 and 23 chars).
pub const DEFAULT_APPEND_COUNT: usize = 55;

pub const FILL_BYTE: u8 = b'0';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageMode {
    InPlace,
    Heap,
}

impl fmt::Display for StorageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageMode::InPlace => write!(f, "in-place"),
            StorageMode::Heap => write!(f, "heap"),
        }
    }
}

/// Heap-mode fields recovered through a candidate record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DecodedHeap {
    pub ptr: usize,
    pub len: usize,
    pub capacity: usize,
    pub alloc_state: Option<usize>,
}

impl DecodedHeap {
    pub fn from_layout<L: HeapLayout>(layout: &L) -> Self {
        Self {
            ptr: layout.ptr() as usize,
            len: layout.len(),
            capacity: layout.capacity(),
            alloc_state: layout.alloc_state(),
        }
    }

    /// Non-null and not pointing back at the string object.
    pub fn points_off_object(&self, object_addr: usize) -> bool {
        self.ptr != 0 && self.ptr != object_addr
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StringProbeResult {
    pub type_name: &'static str,
    pub abi_family: AbiFamily,
    pub declared_size: usize,
    pub candidate_size: usize,
    pub appended: usize,
    pub reported_len: usize,
    pub data_ptr: usize,
    pub object_addr: usize,
    pub mode: StorageMode,
    #[serde(serialize_with = "serialize_hex_grouped")]
    pub in_place: Vec<u8>,
    pub decoded: Option<DecodedHeap>,
    /// Decoded pointer and length agree with `data()` and `size()`.
    pub fields_confirmed: bool,
    /// Decoded allocator word equals the descriptor's constant.
    pub alloc_state_confirmed: Option<bool>,
}

impl StringProbeResult {
    pub fn size_gate_passed(&self) -> bool {
        self.declared_size == self.candidate_size
    }

    pub fn decoded_len_matches_appended(&self) -> bool {
        self.decoded.map_or(false, |d| d.len == self.appended)
    }

    /// Heap mode reached but the candidate record could not be trusted:
    /// refused by the size gate, or decoded values that contradict the
    /// native accessors or the append count.
    pub fn heap_decode_failed(&self) -> bool {
        self.mode == StorageMode::Heap
            && (self.decoded.is_none() || !self.fields_confirmed || !self.decoded_len_matches_appended())
    }
}

/// Outcome of growing a string one character at a time until it spills.
#[derive(Debug, Clone, Serialize)]
pub struct ThresholdFact {
    pub type_name: &'static str,
    pub in_place_capacity: Option<usize>,
    pub limit: usize,
    pub append_count: usize,
}

impl ThresholdFact {
    pub fn append_count_exceeds(&self) -> bool {
        self.in_place_capacity.map_or(false, |cap| self.append_count > cap)
    }
}

pub fn probe_default_string(count: usize) -> Result<StringProbeResult, ProbeError> {
    probe::<DefaultString>(count, None)
}

pub fn probe_custom_alloc_string(
    descriptor: &AllocatorDescriptor,
    count: usize,
) -> Result<StringProbeResult, ProbeError> {
    descriptor.check_shape()?;
    probe::<CustomAllocString>(count, Some(descriptor))
}

/// Grows one instantiation to `count` characters and decodes it.
pub fn probe<K: NativeStringKind>(
    count: usize,
    allocator: Option<&AllocatorDescriptor>,
) -> Result<StringProbeResult, ProbeError> {
    let _timer = scoped_timer(K::TYPE_NAME);

    let mut string = NativeString::<K>::new()?;
    for _ in 0..count {
        string.push(FILL_BYTE)?;
    }

    let reported_len = string.len();
    let data_ptr = string.data_ptr() as usize;
    let object_addr = string.object_addr();
    let in_place = string.object_bytes().to_vec();

    let mode = if string.is_in_place() {
        StorageMode::InPlace
    } else {
        StorageMode::Heap
    };

    let decoded = match mode {
        StorageMode::Heap => match string.reinterpret() {
            Ok(layout) => Some(DecodedHeap::from_layout(&layout)),
            Err(e) => {
                warn!("{}", e);
                None
            }
        },
        StorageMode::InPlace => {
            debug!("{}", ProbeError::InPlace { len: reported_len });
            None
        }
    };

    let fields_confirmed = decoded.map_or(false, |d| d.ptr == data_ptr && d.len == reported_len);
    if decoded.is_some() && !fields_confirmed {
        warn!("{}: decoded fields disagree with data()/size(), field order is suspect", K::TYPE_NAME);
    }

    let alloc_state_confirmed = match (allocator, decoded.and_then(|d| d.alloc_state)) {
        (Some(desc), Some(state)) => Some(desc.matches_state(state)),
        _ => None,
    };

    Ok(StringProbeResult {
        type_name: K::TYPE_NAME,
        abi_family: AbiFamily::ACTIVE,
        declared_size: K::declared_size(),
        candidate_size: K::Layout::candidate_size(),
        appended: count,
        reported_len,
        data_ptr,
        object_addr,
        mode,
        in_place,
        decoded,
        fields_confirmed,
        alloc_state_confirmed,
    })
}

/// Probes every growth count in turn.
pub fn probe_sweep<K: NativeStringKind>(
    counts: &[usize],
    allocator: Option<&AllocatorDescriptor>,
) -> Result<Vec<StringProbeResult>, ProbeError> {
    counts.iter().map(|&n| probe::<K>(n, allocator)).collect()
}

/// Largest length the string still keeps inside its own storage, or `None`
/// if it never spilled within `limit` characters.
pub fn discover_in_place_capacity<K: NativeStringKind>(limit: usize) -> Result<Option<usize>, ProbeError> {
    let mut string = NativeString::<K>::new()?;
    if !string.is_in_place() {
        return Ok(Some(0));
    }

    for _ in 0..limit {
        string.push(FILL_BYTE)?;
        if !string.is_in_place() {
            return Ok(Some(string.len() - 1));
        }
    }

    Ok(None)
}

pub fn threshold_fact<K: NativeStringKind>(limit: usize, append_count: usize) -> Result<ThresholdFact, ProbeError> {
    let in_place_capacity = discover_in_place_capacity::<K>(limit)?;
    let fact = ThresholdFact {
        type_name: K::TYPE_NAME,
        in_place_capacity,
        limit,
        append_count,
    };
    if !fact.append_count_exceeds() {
        warn!(
            "{}: {} appended characters do not exceed the small buffer ({:?})",
            K::TYPE_NAME, append_count, in_place_capacity
        );
    }
    Ok(fact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::string::allocator::FIXED_ALLOC_STATE;
    use crate::string::native::test_kinds::{OversizedString, StuckString};

    #[test]
    fn test_default_string_55_chars() {
        let result = probe_default_string(DEFAULT_APPEND_COUNT).unwrap();

        assert_eq!(result.reported_len, 55);
        assert_eq!(result.mode, StorageMode::Heap);
        assert_eq!(result.in_place.len(), result.declared_size);
        assert!(result.size_gate_passed());

        let decoded = result.decoded.expect("heap fields");
        assert_eq!(decoded.len, 55);
        assert!(decoded.capacity >= 55);
        assert!(decoded.points_off_object(result.object_addr));
        assert_eq!(decoded.alloc_state, None);
        assert!(result.fields_confirmed);
        assert_eq!(result.alloc_state_confirmed, None);
    }

    #[test]
    fn test_custom_alloc_string_55_chars() {
        let desc = AllocatorDescriptor::fixed_state();
        let result = probe_custom_alloc_string(&desc, DEFAULT_APPEND_COUNT).unwrap();

        assert!(result.size_gate_passed());
        assert_eq!(result.mode, StorageMode::Heap);
        assert_eq!(result.in_place.len(), result.declared_size);

        let decoded = result.decoded.expect("heap fields");
        assert_eq!(decoded.alloc_state, Some(FIXED_ALLOC_STATE as usize));
        assert_eq!(decoded.len, 55);
        assert!(decoded.capacity >= 55);
        assert!(decoded.points_off_object(result.object_addr));
        assert!(result.fields_confirmed);
        assert_eq!(result.alloc_state_confirmed, Some(true));
    }

    #[test]
    fn test_short_string_is_not_decoded() {
        let result = probe_default_string(3).unwrap();

        assert_eq!(result.mode, StorageMode::InPlace);
        assert!(!result.in_place.is_empty());
        assert!(result.decoded.is_none());
        assert!(!result.fields_confirmed);
        assert!(!result.decoded_len_matches_appended());
    }

    #[test]
    fn test_sweep_decodes_every_count_above_threshold() {
        let threshold = discover_in_place_capacity::<DefaultString>(256).unwrap().unwrap();
        let counts: Vec<usize> = [threshold + 1, 40, 55, 100, 1000]
            .into_iter()
            .filter(|&n| n > threshold)
            .collect();

        for result in probe_sweep::<DefaultString>(&counts, None).unwrap() {
            assert_eq!(result.mode, StorageMode::Heap);
            assert!(result.decoded_len_matches_appended(), "count {}", result.appended);
        }
    }

    #[test]
    fn test_custom_sweep_keeps_allocator_state() {
        let desc = AllocatorDescriptor::fixed_state();
        for result in probe_sweep::<CustomAllocString>(&[64, 300], Some(&desc)).unwrap() {
            assert_eq!(result.alloc_state_confirmed, Some(true));
            assert!(result.decoded_len_matches_appended());
        }
    }

    #[test]
    fn test_discovered_threshold_is_below_default_count() {
        let default_cap = discover_in_place_capacity::<DefaultString>(256).unwrap();
        let custom_cap = discover_in_place_capacity::<CustomAllocString>(256).unwrap();

        assert!(default_cap.map_or(false, |c| c < DEFAULT_APPEND_COUNT));
        assert!(custom_cap.map_or(false, |c| c < DEFAULT_APPEND_COUNT));
    }

    #[test]
    fn test_threshold_limit_not_reached() {
        assert_eq!(discover_in_place_capacity::<DefaultString>(2).unwrap(), None);

        let fact = threshold_fact::<DefaultString>(256, DEFAULT_APPEND_COUNT).unwrap();
        assert!(fact.append_count_exceeds());

        let short = ThresholdFact {
            in_place_capacity: None,
            ..fact
        };
        assert!(!short.append_count_exceeds());
    }

    #[test]
    fn test_below_threshold_counts_stay_in_place() {
        let threshold = discover_in_place_capacity::<DefaultString>(256).unwrap().unwrap();
        let result = probe_default_string(threshold).unwrap();
        assert_eq!(result.mode, StorageMode::InPlace);
        assert!(result.decoded.is_none());
    }

    #[test]
    fn test_size_mismatch_refuses_decoding() {
        let result = probe::<OversizedString>(100, None).unwrap();

        assert_eq!(result.mode, StorageMode::Heap);
        assert!(!result.size_gate_passed());
        assert!(result.decoded.is_none());
        assert!(!result.fields_confirmed);
        assert!(result.heap_decode_failed());
        assert_eq!(result.in_place.len(), result.declared_size);
    }

    #[test]
    fn test_good_heap_decode_is_not_a_failure() {
        assert!(!probe_default_string(DEFAULT_APPEND_COUNT).unwrap().heap_decode_failed());
        assert!(!probe_default_string(3).unwrap().heap_decode_failed());
    }

    #[test]
    fn test_failed_append_stops_threshold_search() {
        let err = discover_in_place_capacity::<StuckString>(256).unwrap_err();
        assert!(matches!(err, ProbeError::Push { len: 0, .. }));
        assert!(probe::<StuckString>(10, None).is_err());
    }
}
