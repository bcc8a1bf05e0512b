//! Opaque handles for clocks and ports in a [`ConstraintSet`](crate::ConstraintSet).
//!
//! Handles are `u32` indices into the owning set. A handle from one set is
//! meaningless in another; lookups with a foreign or fabricated handle fail
//! with `UnknownPort`/`UnknownClock` instead of panicking.

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Creates a handle from a raw `u32` index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw `u32` index.
            pub fn as_raw(self) -> u32 {
                self.0
            }

            pub(crate) fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

define_id!(
    /// Handle to the clock defined in a constraint set.
    ClockRef
);

define_id!(
    /// Handle to a port declared in a constraint set.
    PortRef
);
