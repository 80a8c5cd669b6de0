//! Arena storage for graph entities.
//!
//! Every entity collection of the graph is backed by a [`Slab`] whose keys
//! are densely packed integer indices, so that derived per-entity data can
//! live in flat arrays or bit vectors indexed by the same ids.
pub mod map;
pub mod slab;

pub use map::SecondaryMap;
pub use slab::Slab;

/// A typed index into an entity arena.
pub trait EntityIndex: Copy + Eq + Default {
    fn new(index: usize) -> Self {
        Self::try_new(index).unwrap()
    }

    fn try_new(index: usize) -> Option<Self>;
    fn index(self) -> usize;
}

/// Declares `u32`-backed entity index newtypes.
///
/// The backing type bounds the number of entities a single graph can hold;
/// indices are only meaningful for the graph instance that allocated them.
#[macro_export]
macro_rules! make_entity {
    ($($(#[$attr:meta])* pub struct $entity:ident(u32);)*) => {
        $(
            $(#[$attr])*
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
            pub struct $entity(u32);

            impl $crate::memory::EntityIndex for $entity {
                #[inline(always)]
                fn try_new(index: usize) -> Option<Self> {
                    if index <= u32::MAX as usize {
                        Some($entity(index as u32))
                    } else {
                        None
                    }
                }

                #[inline(always)]
                fn index(self) -> usize {
                    self.0 as usize
                }
            }
        )*
    };
}
