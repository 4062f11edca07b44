// Tue Jan 13 2026 - Alex

use crate::aggregate::mirror::{RootStruct, RootUnion};
use log::{info, warn};
use serde::Serialize;
use std::fmt;
use std::mem::{align_of, offset_of, size_of};

mod ffi {
    extern "C" {
        pub fn lp_sizeof_root_struct() -> usize;
        pub fn lp_alignof_root_struct() -> usize;
        pub fn lp_sizeof_root_union() -> usize;
        pub fn lp_alignof_root_union() -> usize;
    }
}

/// A Rust mirror paired with the C++ type it claims to reproduce.
pub trait NativeAggregate: Sized {
    const NAME: &'static str;

    fn native_size() -> usize;
    fn native_align() -> usize;
    fn field_offsets() -> Vec<(&'static str, usize)>;
}

impl NativeAggregate for RootStruct {
    const NAME: &'static str = "RootStruct";

    fn native_size() -> usize {
        unsafe { ffi::lp_sizeof_root_struct() }
    }

    fn native_align() -> usize {
        unsafe { ffi::lp_alignof_root_struct() }
    }

    fn field_offsets() -> Vec<(&'static str, usize)> {
        vec![
            ("value_begin", offset_of!(RootStruct, value_begin)),
            ("nested_struct_1a", offset_of!(RootStruct, nested_struct_1a)),
            ("nested_struct_1b", offset_of!(RootStruct, nested_struct_1b)),
            ("value_mid", offset_of!(RootStruct, value_mid)),
            ("nested_struct_2b", offset_of!(RootStruct, nested_struct_2b)),
            ("nested_struct_3b", offset_of!(RootStruct, nested_struct_3b)),
            ("nested_struct_3c", offset_of!(RootStruct, nested_struct_3c)),
            ("m44", offset_of!(RootStruct, anon_4)),
            ("value_end", offset_of!(RootStruct, value_end)),
        ]
    }
}

impl NativeAggregate for RootUnion {
    const NAME: &'static str = "RootUnion";

    fn native_size() -> usize {
        unsafe { ffi::lp_sizeof_root_union() }
    }

    fn native_align() -> usize {
        unsafe { ffi::lp_alignof_root_union() }
    }

    fn field_offsets() -> Vec<(&'static str, usize)> {
        vec![
            ("value_begin", offset_of!(RootUnion, value_begin)),
            ("nested_union_1a", offset_of!(RootUnion, nested_union_1a)),
            ("nested_union_1b", offset_of!(RootUnion, nested_union_1b)),
            ("value_mid", offset_of!(RootUnion, value_mid)),
            ("nested_union_2b", offset_of!(RootUnion, nested_union_2b)),
            ("nested_union_3b", offset_of!(RootUnion, nested_union_3b)),
            ("nested_union_3c", offset_of!(RootUnion, nested_union_3c)),
            ("iii4/fff4", offset_of!(RootUnion, anon_4)),
            ("value_end", offset_of!(RootUnion, value_end)),
        ]
    }
}

/// Size comparison between a mirror and the compiler's own layout.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutAssertion {
    pub name: &'static str,
    pub mirror_size: usize,
    pub native_size: usize,
    pub mirror_align: usize,
    pub native_align: usize,
    pub mirror_offsets: Vec<(&'static str, usize)>,
}

impl LayoutAssertion {
    pub fn holds(&self) -> bool {
        self.mirror_size == self.native_size
    }

    pub fn alignment_matches(&self) -> bool {
        self.mirror_align == self.native_align
    }
}

impl fmt::Display for LayoutAssertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sizeof({}) mirror {} / native {}: {}",
            self.name,
            self.mirror_size,
            self.native_size,
            if self.holds() { "ok" } else { "MISMATCH" }
        )
    }
}

pub fn verify<M: NativeAggregate>() -> LayoutAssertion {
    let assertion = LayoutAssertion {
        name: M::NAME,
        mirror_size: size_of::<M>(),
        native_size: M::native_size(),
        mirror_align: align_of::<M>(),
        native_align: M::native_align(),
        mirror_offsets: M::field_offsets(),
    };

    if assertion.holds() {
        info!("{}", assertion);
    } else {
        warn!("{}", assertion);
    }
    if !assertion.alignment_matches() {
        warn!(
            "alignof({}) mirror {} / native {}",
            M::NAME, assertion.mirror_align, assertion.native_align
        );
    }

    assertion
}

pub fn verify_struct_layout() -> LayoutAssertion {
    verify::<RootStruct>()
}

pub fn verify_union_layout() -> LayoutAssertion {
    verify::<RootUnion>()
}
