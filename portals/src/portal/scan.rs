//! Frame scanning, measuring the rectangle of a portal frame made of any given set of
//! frame blocks.
//!
//! The scan works in four steps, each one depending on the previous:
//! 1. descend from the seed position to the lowest open cell of its column;
//! 2. walk against the facing direction to find the bottom left interior corner;
//! 3. walk along the facing direction to measure the interior width;
//! 4. climb from the corner to measure the interior height, checking both side columns
//!    and finally the top row of the frame.
//!
//! Every walk is bounded by [`MAX_WIDTH`] blocks, so scanning always terminates.

use glam::IVec3;

use crate::geom::{Axis, Face};
use crate::world::BlockView;
use crate::block;

use super::shape::{PortalShapeBuilder, MAX_WIDTH, MAX_HEIGHT, MIN_WIDTH, MIN_HEIGHT};


/// Result of a frame scan, fields are zeroed from the step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameScan {
    /// The bottom left interior corner, none if no corner was found.
    pub bottom_left: Option<IVec3>,
    /// Interior width, zero if no corner or if out of bounds.
    pub width: i32,
    /// Interior height, zero if no width or if out of bounds or if the top row is
    /// missing.
    pub height: i32,
    /// Number of portal blocks found while measuring the height.
    pub portal_blocks: u32,
}

impl FrameScan {

    /// Return true if the scan found a complete frame.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.bottom_left.is_some() && super::shape::is_valid_size(self.width, self.height)
    }

    /// Convert this scan into a shape builder, the anchor is used as the shape position
    /// when no corner has been found.
    pub fn into_builder(self, axis: Axis, anchor: IVec3) -> PortalShapeBuilder {
        match self.bottom_left {
            None => PortalShapeBuilder::invalid(axis, anchor),
            Some(bottom_left) if self.width == 0 => PortalShapeBuilder::invalid(axis, bottom_left),
            Some(bottom_left) => PortalShapeBuilder::new(axis, bottom_left, self.width, self.height, self.portal_blocks),
        }
    }

}


/// Scan the frame around the given position for the given axis, the frame predicate
/// tells which block ids are part of the frame.
pub fn scan_frame<V, F>(view: &V, pos: IVec3, axis: Axis, frame: F) -> FrameScan
where
    V: BlockView + ?Sized,
    F: Fn(u8) -> bool,
{

    let facing = axis.facing();
    let mut scan = FrameScan::default();

    let Some(bottom_left) = find_bottom_left(view, facing, pos, &frame) else {
        return scan;
    };

    scan.bottom_left = Some(bottom_left);
    scan.width = find_width(view, bottom_left, facing, &frame);
    if scan.width == 0 {
        return scan;
    }

    let (height, portal_blocks) = find_height(view, bottom_left, facing, scan.width, &frame);
    scan.height = height;
    scan.portal_blocks = portal_blocks;
    scan

}

/// Descend to the floor of the column and walk against the facing direction to find
/// the bottom left interior corner.
fn find_bottom_left<V, F>(view: &V, facing: Face, mut pos: IVec3, frame: &F) -> Option<IVec3>
where
    V: BlockView + ?Sized,
    F: Fn(u8) -> bool,
{

    let floor = view.get_min_y().max(pos.y - MAX_WIDTH);
    while pos.y > floor && block::is_empty(view.get_block_id(pos - IVec3::Y)) {
        pos.y -= 1;
    }

    let dir = facing.opposite();
    let distance = distance_until_edge_above_frame(view, pos, dir, frame) - 1;
    (distance >= 0).then(|| dir.offset(pos, distance))

}

/// Measure the interior width from the bottom left corner, zero if out of bounds.
fn find_width<V, F>(view: &V, bottom_left: IVec3, facing: Face, frame: &F) -> i32
where
    V: BlockView + ?Sized,
    F: Fn(u8) -> bool,
{
    let width = distance_until_edge_above_frame(view, bottom_left, facing, frame);
    if (MIN_WIDTH..=MAX_WIDTH).contains(&width) { width } else { 0 }
}

/// Walk from the given position toward the given direction, over frame blocks, until a
/// frame block is found at the walked level. Return the distance to that edge, or zero
/// if the floor isn't made of frame blocks, or if any other block is in the way, or if
/// no edge is found within range.
fn distance_until_edge_above_frame<V, F>(view: &V, pos: IVec3, dir: Face, frame: &F) -> i32
where
    V: BlockView + ?Sized,
    F: Fn(u8) -> bool,
{

    for i in 0..=MAX_WIDTH {

        let check_pos = dir.offset(pos, i);
        let id = view.get_block_id(check_pos);

        if !block::is_empty(id) {
            return if frame(id) { i } else { 0 };
        }

        if !frame(view.get_block_id(check_pos - IVec3::Y)) {
            break;
        }

    }

    0

}

/// Measure the interior height from the bottom left corner and count the portal blocks
/// found inside, the height is zero if out of bounds or if the top row is missing.
fn find_height<V, F>(view: &V, bottom_left: IVec3, facing: Face, width: i32, frame: &F) -> (i32, u32)
where
    V: BlockView + ?Sized,
    F: Fn(u8) -> bool,
{
    let (height, portal_blocks) = distance_until_top(view, bottom_left, facing, width, frame);
    if (MIN_HEIGHT..=MAX_HEIGHT).contains(&height) && has_top_frame(view, bottom_left, facing, width, height, frame) {
        (height, portal_blocks)
    } else {
        (0, portal_blocks)
    }
}

/// Climb the rows of the interior while both side columns are frame blocks and the
/// interior is empty.
fn distance_until_top<V, F>(view: &V, bottom_left: IVec3, facing: Face, width: i32, frame: &F) -> (i32, u32)
where
    V: BlockView + ?Sized,
    F: Fn(u8) -> bool,
{

    let mut portal_blocks = 0;

    for i in 0..MAX_HEIGHT {

        let row = bottom_left + IVec3::new(0, i, 0);

        if !frame(view.get_block_id(facing.offset(row, -1))) {
            return (i, portal_blocks);
        }

        if !frame(view.get_block_id(facing.offset(row, width))) {
            return (i, portal_blocks);
        }

        for j in 0..width {
            let id = view.get_block_id(facing.offset(row, j));
            if !block::is_empty(id) {
                return (i, portal_blocks);
            }
            if id == block::PORTAL {
                portal_blocks += 1;
            }
        }

    }

    (MAX_HEIGHT, portal_blocks)

}

/// Return true if the row just above the interior is entirely made of frame blocks.
fn has_top_frame<V, F>(view: &V, bottom_left: IVec3, facing: Face, width: i32, height: i32, frame: &F) -> bool
where
    V: BlockView + ?Sized,
    F: Fn(u8) -> bool,
{
    let top = bottom_left + IVec3::new(0, height, 0);
    (0..width).all(|i| frame(view.get_block_id(facing.offset(top, i))))
}
