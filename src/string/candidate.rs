// Tue Jan 13 2026 - Alex

use std::ffi::c_void;
use std::mem;

/// Accessors shared by every candidate heap-mode record of
/// `std::basic_string<char>`. Field order is fixed per ABI family at build
/// time; a record is only trusted when its size equals the native `sizeof`.
pub trait HeapLayout: Copy {
    fn ptr(&self) -> *const c_void;
    fn len(&self) -> usize;
    /// Raw capacity word. On libc++ the low bit carries the long-mode flag.
    fn capacity(&self) -> usize;

    fn alloc_state(&self) -> Option<usize> {
        None
    }

    fn candidate_size() -> usize {
        mem::size_of::<Self>()
    }
}

/// Mirror of the representative custom allocator: a single state word.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedStateAlloc {
    pub state: usize,
}

/// Allocator blocks the custom-allocator record can embed.
pub trait AllocState: Copy {
    fn state_word(&self) -> usize;
}

impl AllocState for FixedStateAlloc {
    fn state_word(&self) -> usize {
        self.state
    }
}

#[cfg(string_abi = "msvc")]
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct StringLayout {
    pub ptr: *const c_void,
    pub reserved: usize,
    pub len: usize,
    pub capacity: usize,
}

#[cfg(string_abi = "libcxx")]
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct StringLayout {
    pub capacity: usize,
    pub len: usize,
    pub ptr: *const c_void,
}

#[cfg(string_abi = "libstdcxx")]
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct StringLayout {
    pub ptr: *const c_void,
    pub len: usize,
    pub capacity: usize,
    pub reserved: usize,
}

impl HeapLayout for StringLayout {
    fn ptr(&self) -> *const c_void {
        self.ptr
    }

    fn len(&self) -> usize {
        self.len
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(string_abi = "msvc")]
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct StringWithCustomAllocLayout<A: AllocState> {
    pub alloc: A,
    pub ptr: *const c_void,
    pub reserved: usize,
    pub len: usize,
    pub capacity: usize,
}

#[cfg(string_abi = "libcxx")]
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct StringWithCustomAllocLayout<A: AllocState> {
    pub capacity: usize,
    pub len: usize,
    pub ptr: *const c_void,
    pub alloc: A,
}

#[cfg(string_abi = "libstdcxx")]
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct StringWithCustomAllocLayout<A: AllocState> {
    pub alloc: A,
    pub ptr: *const c_void,
    pub len: usize,
    pub capacity: usize,
    pub reserved: usize,
}

impl<A: AllocState> HeapLayout for StringWithCustomAllocLayout<A> {
    fn ptr(&self) -> *const c_void {
        self.ptr
    }

    fn len(&self) -> usize {
        self.len
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn alloc_state(&self) -> Option<usize> {
        Some(self.alloc.state_word())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::string::AbiFamily;
    use std::mem::offset_of;

    #[test]
    fn test_default_record_holds_three_words_or_more() {
        let words = StringLayout::candidate_size() / mem::size_of::<usize>();
        assert!(words >= 3);
        assert_eq!(StringLayout::candidate_size() % mem::align_of::<usize>(), 0);
    }

    #[test]
    fn test_custom_record_adds_one_allocator_word() {
        assert_eq!(
            StringWithCustomAllocLayout::<FixedStateAlloc>::candidate_size(),
            StringLayout::candidate_size() + mem::size_of::<FixedStateAlloc>()
        );
    }

    #[test]
    fn test_allocator_block_position_follows_family() {
        let alloc_offset = offset_of!(StringWithCustomAllocLayout<FixedStateAlloc>, alloc);
        let ptr_offset = offset_of!(StringWithCustomAllocLayout<FixedStateAlloc>, ptr);
        if AbiFamily::ACTIVE.allocator_state_first() {
            assert_eq!(alloc_offset, 0);
            assert!(ptr_offset > alloc_offset);
        } else {
            assert!(alloc_offset > ptr_offset);
        }
    }

    #[test]
    fn test_accessors_read_named_fields() {
        let mut raw = [0usize; 5];
        let record: StringWithCustomAllocLayout<FixedStateAlloc> =
            unsafe { std::ptr::read_unaligned(raw.as_ptr() as *const _) };
        assert_eq!(record.len(), 0);
        assert_eq!(record.alloc_state(), Some(0));

        let len_slot = offset_of!(StringWithCustomAllocLayout<FixedStateAlloc>, len) / mem::size_of::<usize>();
        raw[len_slot] = 55;
        let record: StringWithCustomAllocLayout<FixedStateAlloc> =
            unsafe { std::ptr::read_unaligned(raw.as_ptr() as *const _) };
        assert_eq!(record.len(), 55);
    }
}
