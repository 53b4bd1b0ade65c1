//! Arena-index ID types for type-safe per-scan identities.
//!
//! Each ID wraps a `u32` arena index to prevent cross-type confusion: a
//! `NodeId` cannot be accidentally used where a `DescriptorId` is expected.
//! IDs are assigned during snapshot construction or traversal and are valid
//! for a single scan only; they are never persisted or compared across scans.

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            /// Create a new ID from an arena index.
            pub fn new(index: u32) -> Self {
                Self(index)
            }

            /// Get the arena index.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl From<u32> for $name {
            fn from(index: u32) -> Self {
                Self(index)
            }
        }
    };
}

define_id!(
    /// DOM node identity, scoped to one snapshot.
    NodeId
);

define_id!(
    /// Component descriptor identity, scoped to one traversal pass.
    DescriptorId
);
