// Tue Jan 13 2026 - Alex

use crate::string::candidate::{FixedStateAlloc, HeapLayout, StringLayout, StringWithCustomAllocLayout};
use crate::string::error::ProbeError;
use std::ffi::{c_char, c_int, c_void};
use std::marker::PhantomData;
use std::ptr::{self, NonNull};
use std::slice;

mod ffi {
    use std::ffi::{c_char, c_int, c_void};

    extern "C" {
        pub fn lp_default_string_new() -> *mut c_void;
        pub fn lp_default_string_free(handle: *mut c_void);
        pub fn lp_default_string_push(handle: *mut c_void, c: c_char) -> c_int;
        pub fn lp_default_string_len(handle: *const c_void) -> usize;
        pub fn lp_default_string_data(handle: *const c_void) -> *const c_char;
        pub fn lp_default_string_sizeof() -> usize;
        pub fn lp_default_string_alignof() -> usize;

        pub fn lp_custom_string_new() -> *mut c_void;
        pub fn lp_custom_string_free(handle: *mut c_void);
        pub fn lp_custom_string_push(handle: *mut c_void, c: c_char) -> c_int;
        pub fn lp_custom_string_len(handle: *const c_void) -> usize;
        pub fn lp_custom_string_data(handle: *const c_void) -> *const c_char;
        pub fn lp_custom_string_sizeof() -> usize;
        pub fn lp_custom_string_alignof() -> usize;

        pub fn lp_custom_alloc_state() -> usize;
        pub fn lp_custom_alloc_sizeof() -> usize;
        pub fn lp_custom_alloc_param() -> usize;
    }
}

/// One instantiation of the native string template together with the
/// candidate record used to decode it.
///
/// # Safety
///
/// `new_raw` must return either null or a pointer to a live object that the
/// other functions accept, and `free_raw` must release exactly that object.
pub unsafe trait NativeStringKind {
    const TYPE_NAME: &'static str;
    type Layout: HeapLayout;

    fn new_raw() -> *mut c_void;
    unsafe fn free_raw(handle: *mut c_void);
    /// Zero when the native append failed.
    unsafe fn push_raw(handle: *mut c_void, c: c_char) -> c_int;
    unsafe fn len_raw(handle: *const c_void) -> usize;
    unsafe fn data_raw(handle: *const c_void) -> *const c_char;
    fn declared_size() -> usize;
    fn declared_align() -> usize;
}

pub struct DefaultString;

unsafe impl NativeStringKind for DefaultString {
    const TYPE_NAME: &'static str = "std::string";
    type Layout = StringLayout;

    fn new_raw() -> *mut c_void {
        unsafe { ffi::lp_default_string_new() }
    }

    unsafe fn free_raw(handle: *mut c_void) {
        ffi::lp_default_string_free(handle)
    }

    unsafe fn push_raw(handle: *mut c_void, c: c_char) -> c_int {
        ffi::lp_default_string_push(handle, c)
    }

    unsafe fn len_raw(handle: *const c_void) -> usize {
        ffi::lp_default_string_len(handle)
    }

    unsafe fn data_raw(handle: *const c_void) -> *const c_char {
        ffi::lp_default_string_data(handle)
    }

    fn declared_size() -> usize {
        unsafe { ffi::lp_default_string_sizeof() }
    }

    fn declared_align() -> usize {
        unsafe { ffi::lp_default_string_alignof() }
    }
}

pub struct CustomAllocString;

unsafe impl NativeStringKind for CustomAllocString {
    const TYPE_NAME: &'static str =
        "std::basic_string<char, std::char_traits<char>, FixedStateAllocator<char, 64>>";
    type Layout = StringWithCustomAllocLayout<FixedStateAlloc>;

    fn new_raw() -> *mut c_void {
        unsafe { ffi::lp_custom_string_new() }
    }

    unsafe fn free_raw(handle: *mut c_void) {
        ffi::lp_custom_string_free(handle)
    }

    unsafe fn push_raw(handle: *mut c_void, c: c_char) -> c_int {
        ffi::lp_custom_string_push(handle, c)
    }

    unsafe fn len_raw(handle: *const c_void) -> usize {
        ffi::lp_custom_string_len(handle)
    }

    unsafe fn data_raw(handle: *const c_void) -> *const c_char {
        ffi::lp_custom_string_data(handle)
    }

    fn declared_size() -> usize {
        unsafe { ffi::lp_custom_string_sizeof() }
    }

    fn declared_align() -> usize {
        unsafe { ffi::lp_custom_string_alignof() }
    }
}

pub(crate) fn custom_alloc_state() -> usize {
    unsafe { ffi::lp_custom_alloc_state() }
}

pub(crate) fn custom_alloc_size() -> usize {
    unsafe { ffi::lp_custom_alloc_sizeof() }
}

pub(crate) fn custom_alloc_param() -> usize {
    unsafe { ffi::lp_custom_alloc_param() }
}

/// Owning handle to a live native string.
pub struct NativeString<K: NativeStringKind> {
    raw: NonNull<c_void>,
    _kind: PhantomData<K>,
}

impl<K: NativeStringKind> NativeString<K> {
    pub fn new() -> Result<Self, ProbeError> {
        let raw = NonNull::new(K::new_raw()).ok_or(ProbeError::NativeAllocation(K::TYPE_NAME))?;
        Ok(Self {
            raw,
            _kind: PhantomData,
        })
    }

    pub fn push(&mut self, c: u8) -> Result<(), ProbeError> {
        if unsafe { K::push_raw(self.raw.as_ptr(), c as c_char) } == 0 {
            return Err(ProbeError::Push {
                type_name: K::TYPE_NAME,
                len: self.len(),
            });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        unsafe { K::len_raw(self.raw.as_ptr()) }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn data_ptr(&self) -> *const u8 {
        unsafe { K::data_raw(self.raw.as_ptr()) as *const u8 }
    }

    pub fn object_addr(&self) -> usize {
        self.raw.as_ptr() as usize
    }

    pub fn declared_size() -> usize {
        K::declared_size()
    }

    /// Raw bytes of the string object itself (not of its character buffer).
    /// The native side zero-fills the storage before construction, so every
    /// byte is initialised.
    pub fn object_bytes(&self) -> &[u8] {
        unsafe { slice::from_raw_parts(self.raw.as_ptr() as *const u8, K::declared_size()) }
    }

    /// True while the characters live inside the object's own storage.
    pub fn is_in_place(&self) -> bool {
        let start = self.object_addr();
        let data = self.data_ptr() as usize;
        data >= start && data < start + K::declared_size()
    }

    /// Reads the object's storage through the candidate record. Refused when
    /// the record size differs from the native size.
    pub fn reinterpret(&self) -> Result<K::Layout, ProbeError> {
        let declared = K::declared_size();
        let candidate = K::Layout::candidate_size();
        if declared != candidate {
            return Err(ProbeError::SizeMismatch {
                type_name: K::TYPE_NAME,
                declared,
                candidate,
            });
        }
        Ok(unsafe { ptr::read_unaligned(self.raw.as_ptr() as *const K::Layout) })
    }
}

impl<K: NativeStringKind> Drop for NativeString<K> {
    fn drop(&mut self) {
        unsafe { K::free_raw(self.raw.as_ptr()) }
    }
}
