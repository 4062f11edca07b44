// Tue Jan 13 2026 - Alex

pub mod mirror;
pub mod verifier;

pub use mirror::{RootStruct, RootUnion};
pub use verifier::{LayoutAssertion, NativeAggregate, verify, verify_struct_layout, verify_union_layout};
