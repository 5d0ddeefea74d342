use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

/// Opaque handle to a path stored in a [`PathInterner`](crate::PathInterner).
///
/// Equal input strings always produce equal handles; a handle resolves back
/// to exactly the string it was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathId(NonZeroU32);

impl PathId {
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    pub fn value(&self) -> u32 {
        self.0.get()
    }

    /// Convert to the underlying u32 value
    pub fn to_u32(self) -> u32 {
        self.0.get()
    }
}
