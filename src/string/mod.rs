// Tue Jan 13 2026 - Alex

pub mod profile;
pub mod candidate;
pub mod native;
pub mod allocator;
pub mod prober;
pub mod error;

pub use profile::AbiFamily;
pub use candidate::{HeapLayout, FixedStateAlloc, StringLayout, StringWithCustomAllocLayout};
pub use native::{NativeString, NativeStringKind, DefaultString, CustomAllocString};
pub use allocator::{AllocatorDescriptor, FIXED_ALLOC_STATE};
pub use prober::{
    StringProbeResult, DecodedHeap, StorageMode, ThresholdFact, DEFAULT_APPEND_COUNT,
    probe_default_string, probe_custom_alloc_string, probe_sweep, discover_in_place_capacity, threshold_fact,
};
pub use error::ProbeError;
