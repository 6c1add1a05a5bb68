//! Strongly typed dense identifiers.
//!
//! Every id is an index into an arena owned by the catalogue or the graph,
//! assigned sequentially from zero at construction time.

use std::fmt;

/// Generate a typed id wrapper around a `u32` index.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        $vis struct $name(pub u32);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// Id for the arena slot at `index`.
            ///
            /// # Panics
            ///
            /// Panics if `index` does not fit in a `u32`; arenas never grow
            /// that large.
            #[inline]
            pub(crate) fn from_index(index: usize) -> Self {
                match u32::try_from(index) {
                    Ok(raw) => $name(raw),
                    Err(_) => panic!(concat!(stringify!($name), " overflow: {}"), index),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }
    };
}

typed_id! {
    /// Index of a stop in the catalogue.
    pub struct StopId;
}

typed_id! {
    /// Index of a bus route in the catalogue.
    pub struct BusId;
}

typed_id! {
    /// Index of a graph vertex.
    pub struct VertexId;
}

typed_id! {
    /// Index of a directed graph edge.
    pub struct EdgeId;
}
