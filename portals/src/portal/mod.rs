//! Portal frames detection and the portal behaviors.
//!
//! A portal is a rectangle of frame blocks enclosing an interior between 2x3 and 21x21
//! blocks. The frame material decides where the portal leads: obsidian is the native
//! material leading to the nether, and every custom dimension registers its own frame
//! blocks in the [`DimensionRegistry`](crate::dimension::DimensionRegistry).

pub mod shape;
pub mod scan;
pub mod native;
mod resolve;
pub mod ignite;
pub mod forcer;

pub use shape::{PortalShape, PortalShapeBuilder, AlreadyBoundError};
pub use resolve::{
    find_portal_shape,
    find_empty_portal_shape,
    find_portal_dimension,
    is_portal_for_dimension,
    is_custom_portal,
};
