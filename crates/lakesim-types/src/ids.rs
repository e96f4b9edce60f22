//! Type-safe identifier wrappers.
//!
//! Fish are identified by a [`FishId`] issued by the lake from a monotonic
//! counter, so an id is never reused within a run even after deaths and
//! catches. Neighbor exclusion in the steering model compares positions in
//! the population, never ids or structural equality.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Generates a newtype wrapper around a `u64` counter value.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub u64);

        impl $name {
            /// Wrap a raw counter value.
            pub const fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            /// Return the inner counter value.
            pub const fn into_inner(self) -> u64 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Identifier for a fish in the lake population.
    FishId
}
