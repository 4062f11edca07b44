// Tue Jan 13 2026 - Alex

use serde::Serialize;
use std::fmt;

/// Compiler / standard-library family that decides the physical field order
/// of `std::basic_string`. Chosen by `build.rs`, never at run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AbiFamily {
    /// MSVC STL: allocator state and the small-buffer union come first.
    Msvc,
    /// LLVM libc++: capacity, length, pointer, then allocator state.
    LibCxx,
    /// GNU libstdc++: allocator state, pointer, length, capacity / local buffer.
    LibStdCxx,
}

impl AbiFamily {
    #[cfg(string_abi = "msvc")]
    pub const ACTIVE: AbiFamily = AbiFamily::Msvc;
    #[cfg(string_abi = "libcxx")]
    pub const ACTIVE: AbiFamily = AbiFamily::LibCxx;
    #[cfg(string_abi = "libstdcxx")]
    pub const ACTIVE: AbiFamily = AbiFamily::LibStdCxx;

    pub fn name(&self) -> &'static str {
        match self {
            AbiFamily::Msvc => "msvc",
            AbiFamily::LibCxx => "libc++",
            AbiFamily::LibStdCxx => "libstdc++",
        }
    }

    /// Whether the allocator state block precedes the pointer/length/capacity
    /// triple in the custom-allocator instantiation.
    pub fn allocator_state_first(&self) -> bool {
        !matches!(self, AbiFamily::LibCxx)
    }
}

impl fmt::Display for AbiFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
