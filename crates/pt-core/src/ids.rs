//! Arena identifiers for waypoints, chains and carriers.
//!
//! Each id is a `u32` newtype.  `NodeId` and `ChainId` index straight into
//! the path graph's arenas, and `CarrierId` indexes the fleet's engine list,
//! so ordering by id is also ordering by arena position.

use std::fmt;

macro_rules! arena_id {
    ($(#[$attr:meta])* $name:ident, $prefix:literal) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub u32);

        impl $name {
            /// Placeholder for "not assigned yet".
            pub const INVALID: $name = $name(u32::MAX);

            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                u32::try_from(n).map($name)
            }
        }
    };
}

arena_id! {
    /// A waypoint in the path graph's node arena.
    NodeId, "node#"
}

arena_id! {
    /// A chain of waypoints in the path graph.
    ChainId, "chain#"
}

arena_id! {
    /// One carrier in a fleet run.
    CarrierId, "carrier#"
}
