// Tue Jan 13 2026 - Alex

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RootStructAnon1 {
    pub m1: f32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NestedStruct2a {
    pub m2: f32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NestedStruct3a {
    pub m3: f32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RootStructAnon4 {
    pub m44: f32,
}

/// Mirror of the C++ `RootStruct`. Each anonymous aggregate is a named type
/// here; the member folded into the parent scope is `anon_4`, reachable
/// through accessors.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RootStruct {
    pub value_begin: i32,
    pub nested_struct_1a: RootStructAnon1,
    pub nested_struct_1b: RootStructAnon1,
    pub value_mid: i32,
    pub nested_struct_2b: NestedStruct2a,
    pub nested_struct_3b: NestedStruct3a,
    pub nested_struct_3c: NestedStruct3a,
    pub anon_4: RootStructAnon4,
    pub value_end: i32,
}

impl RootStruct {
    pub fn m44(&self) -> f32 {
        self.anon_4.m44
    }

    pub fn set_m44(&mut self, value: f32) {
        self.anon_4.m44 = value;
    }
}

#[repr(C)]
#[derive(Clone, Copy)]
pub union RootUnionAnon1 {
    pub iii1: i32,
    pub fff1: f32,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub union NestedUnion2a {
    pub iii2: i32,
    pub fff2: f32,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub union NestedUnion3a {
    pub iii3: i32,
    pub fff3: f32,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub union RootUnionAnon4 {
    pub iii4: i32,
    pub fff4: f32,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct RootUnion {
    pub value_begin: i32,
    pub nested_union_1a: RootUnionAnon1,
    pub nested_union_1b: RootUnionAnon1,
    pub value_mid: i32,
    pub nested_union_2b: NestedUnion2a,
    pub nested_union_3b: NestedUnion3a,
    pub nested_union_3c: NestedUnion3a,
    pub anon_4: RootUnionAnon4,
    pub value_end: i32,
}

impl RootUnion {
    pub fn iii4(&self) -> i32 {
        unsafe { self.anon_4.iii4 }
    }

    pub fn fff4(&self) -> f32 {
        unsafe { self.anon_4.fff4 }
    }

    pub fn set_fff4(&mut self, value: f32) {
        self.anon_4.fff4 = value;
    }
}

impl Default for RootUnion {
    fn default() -> Self {
        Self {
            value_begin: 0,
            nested_union_1a: RootUnionAnon1 { iii1: 0 },
            nested_union_1b: RootUnionAnon1 { iii1: 0 },
            value_mid: 0,
            nested_union_2b: NestedUnion2a { iii2: 0 },
            nested_union_3b: NestedUnion3a { iii3: 0 },
            nested_union_3c: NestedUnion3a { iii3: 0 },
            anon_4: RootUnionAnon4 { iii4: 0 },
            value_end: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{align_of, offset_of, size_of};

    #[test]
    fn test_struct_mirror_packs_nine_words() {
        assert_eq!(size_of::<RootStruct>(), 9 * 4);
        assert_eq!(align_of::<RootStruct>(), 4);
        assert_eq!(offset_of!(RootStruct, value_mid), 12);
        assert_eq!(offset_of!(RootStruct, anon_4), 28);
        assert_eq!(offset_of!(RootStruct, value_end), 32);
    }

    #[test]
    fn test_union_mirror_packs_nine_words() {
        assert_eq!(size_of::<RootUnionAnon1>(), 4);
        assert_eq!(size_of::<RootUnion>(), 9 * 4);
        assert_eq!(offset_of!(RootUnion, nested_union_2b), 16);
    }

    #[test]
    fn test_folded_member_accessors() {
        let mut s = RootStruct::default();
        s.set_m44(1.5);
        assert_eq!(s.m44(), 1.5);

        let mut u = RootUnion::default();
        u.set_fff4(1.0);
        assert_eq!(u.iii4(), 1.0f32.to_bits() as i32);
        assert_eq!(u.fff4(), 1.0);
    }
}
