//! Portal shapes and their one-time binding to a dimension.

use glam::IVec3;
use thiserror::Error;

use crate::dimension::DimensionId;
use crate::geom::{Axis, Face};
use crate::world::World;
use crate::block;


/// Minimum interior width of a portal.
pub const MIN_WIDTH: i32 = 2;
/// Maximum interior width of a portal, this is also the search radius of every scan.
pub const MAX_WIDTH: i32 = 21;
/// Minimum interior height of a portal.
pub const MIN_HEIGHT: i32 = 3;
/// Maximum interior height of a portal.
pub const MAX_HEIGHT: i32 = 21;


/// Return true if the given interior size is the size of a valid portal.
#[inline]
pub fn is_valid_size(width: i32, height: i32) -> bool {
    (MIN_WIDTH..=MAX_WIDTH).contains(&width) && (MIN_HEIGHT..=MAX_HEIGHT).contains(&height)
}


/// Error returned when binding a dimension to a shape that is already bound, this is a
/// logic error of the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("portal dimension was already bound to {bound}, cannot bind {requested}")]
pub struct AlreadyBoundError {
    /// The dimension the shape is bound to.
    pub bound: DimensionId,
    /// The dimension that was requested.
    pub requested: DimensionId,
}


/// The interior rectangle of a portal frame, bound to the dimension it leads to.
///
/// A shape with a zero width or height is invalid, it still carries the axis and the
/// position where detection stopped. Shapes can only be obtained from a
/// [`PortalShapeBuilder`], they can't be modified once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PortalShape {
    axis: Axis,
    facing: Face,
    bottom_left: IVec3,
    width: i32,
    height: i32,
    portal_blocks: u32,
    dimension: DimensionId,
}

impl PortalShape {

    /// The axis the portal plane extends along.
    #[inline]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// The direction from the bottom left corner toward the rest of the interior.
    #[inline]
    pub fn facing(&self) -> Face {
        self.facing
    }

    /// The bottom left interior position, or where the detection stopped if invalid.
    #[inline]
    pub fn bottom_left(&self) -> IVec3 {
        self.bottom_left
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of portal blocks already present in the interior when detected.
    #[inline]
    pub fn portal_blocks(&self) -> u32 {
        self.portal_blocks
    }

    /// The dimension this portal leads to, the native dimension for invalid shapes.
    #[inline]
    pub fn dimension(&self) -> &DimensionId {
        &self.dimension
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        is_valid_size(self.width, self.height)
    }

    /// Return true if the shape is valid and its whole interior is made of portal blocks.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.is_valid() && self.portal_blocks == (self.width * self.height) as u32
    }

    /// Iterate over every interior position of this shape, row by row from the bottom.
    pub fn iter_interior(&self) -> impl Iterator<Item = IVec3> + '_ {
        (0..self.height).flat_map(move |dy| {
            (0..self.width).map(move |dx| self.facing.offset(self.bottom_left + IVec3::new(0, dy, 0), dx))
        })
    }

    /// Fill the interior of this shape with portal blocks oriented along its axis. This
    /// does nothing if the shape is invalid.
    pub fn create_portal_blocks(&self, world: &mut World) {
        if !self.is_valid() {
            return;
        }
        let metadata = self.axis.to_metadata();
        for pos in self.iter_interior() {
            world.set_block(pos, block::PORTAL, metadata);
        }
    }

}


/// Builder of [`PortalShape`], the only place where a shape gets its dimension.
///
/// A shape with an invalid size is bound to the native dimension as soon as it is
/// created, only valid shapes accept a binding. Building a valid shape that was never
/// bound gives it the native dimension.
#[derive(Debug, Clone)]
pub struct PortalShapeBuilder {
    axis: Axis,
    bottom_left: IVec3,
    width: i32,
    height: i32,
    portal_blocks: u32,
    dimension: Option<DimensionId>,
}

impl PortalShapeBuilder {

    pub fn new(axis: Axis, bottom_left: IVec3, width: i32, height: i32, portal_blocks: u32) -> Self {
        let mut builder = Self {
            axis,
            bottom_left,
            width,
            height,
            portal_blocks,
            dimension: None,
        };
        if !builder.is_valid() {
            builder.dimension = Some(DimensionId::NETHER);
        }
        builder
    }

    /// Create a builder for the zero-size shape anchored at the given position.
    pub fn invalid(axis: Axis, anchor: IVec3) -> Self {
        Self::new(axis, anchor, 0, 0, 0)
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        is_valid_size(self.width, self.height)
    }

    /// Return true if a dimension is already bound to this shape.
    #[inline]
    pub fn is_bound(&self) -> bool {
        self.dimension.is_some()
    }

    /// Bind the dimension of this shape, this can only be done once.
    pub fn bind(&mut self, dimension: DimensionId) -> Result<&mut Self, AlreadyBoundError> {
        match &self.dimension {
            Some(bound) => Err(AlreadyBoundError {
                bound: bound.clone(),
                requested: dimension,
            }),
            None => {
                self.dimension = Some(dimension);
                Ok(self)
            }
        }
    }

    /// Seal the shape.
    pub fn build(self) -> PortalShape {
        PortalShape {
            axis: self.axis,
            facing: self.axis.facing(),
            bottom_left: self.bottom_left,
            width: self.width,
            height: self.height,
            portal_blocks: self.portal_blocks,
            dimension: self.dimension.unwrap_or(DimensionId::NETHER),
        }
    }

}
