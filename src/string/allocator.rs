// Tue Jan 13 2026 - Alex

use crate::string::candidate::FixedStateAlloc;
use crate::string::error::ProbeError;
use crate::string::native;
use serde::Serialize;
use std::fmt;
use std::mem;

/// Value every fixed-state allocator instance is initialised with.
pub const FIXED_ALLOC_STATE: u64 = 0xFAFA_0000_FAFA_0000;

/// Describes the custom allocator a string is instantiated with: one state
/// word and no behaviour beyond allocate / deallocate / equality / rebind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocatorDescriptor {
    pub name: String,
    pub state_size: usize,
    pub state: usize,
    pub alignment_param: usize,
}

impl AllocatorDescriptor {
    /// Descriptor of the allocator compiled into the native probe library.
    pub fn fixed_state() -> Self {
        Self {
            name: "FixedStateAllocator<char, 64>".to_string(),
            state_size: native::custom_alloc_size(),
            state: native::custom_alloc_state(),
            alignment_param: native::custom_alloc_param(),
        }
    }

    /// The descriptor must describe a block the Rust mirror can hold.
    pub fn check_shape(&self) -> Result<(), ProbeError> {
        let expected = mem::size_of::<FixedStateAlloc>();
        if self.state_size != expected {
            return Err(ProbeError::AllocatorShape {
                expected,
                actual: self.state_size,
            });
        }
        Ok(())
    }

    pub fn matches_state(&self, decoded: usize) -> bool {
        decoded == self.state
    }
}

impl fmt::Display for AllocatorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} bytes, state {:#x})", self.name, self.state_size, self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_state_descriptor() {
        let desc = AllocatorDescriptor::fixed_state();
        assert_eq!(desc.state, FIXED_ALLOC_STATE as usize);
        assert_eq!(desc.alignment_param, 64);
        assert!(desc.check_shape().is_ok());
        assert!(desc.matches_state(FIXED_ALLOC_STATE as usize));
        assert!(!desc.matches_state(0));
    }

    #[test]
    fn test_shape_mismatch_is_reported() {
        let desc = AllocatorDescriptor {
            name: "Wide".to_string(),
            state_size: 16,
            state: 1,
            alignment_param: 8,
        };
        assert_eq!(
            desc.check_shape(),
            Err(ProbeError::AllocatorShape {
                expected: mem::size_of::<FixedStateAlloc>(),
                actual: 16
            })
        );
    }
}
