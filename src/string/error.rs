// Tue Jan 13 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    #[error("Native allocation failed for {0}")]
    NativeAllocation(&'static str),
    #[error("Candidate layout for {type_name} is {candidate} bytes but the native type is {declared} bytes")]
    SizeMismatch {
        type_name: &'static str,
        declared: usize,
        candidate: usize,
    },
    #[error("Allocator state block is {actual} bytes, mirror expects {expected}")]
    AllocatorShape { expected: usize, actual: usize },
    #[error("Appending to {type_name} failed at length {len}")]
    Push { type_name: &'static str, len: usize },
    #[error("String of length {len} is still in place, heap fields are not meaningful")]
    InPlace { len: usize },
}
