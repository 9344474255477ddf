//! The native portal detector, only obsidian frames are accepted.

use glam::IVec3;

use crate::geom::Axis;
use crate::world::BlockView;
use crate::block;

use super::scan::scan_frame;
use super::shape::PortalShapeBuilder;


/// Return true if the block is the native frame block.
#[inline]
pub fn is_native_frame(id: u8) -> bool {
    id == block::OBSIDIAN
}

/// Detect a native obsidian frame around the given position. The returned builder is
/// unbound if the shape is valid, the caller decides which dimension it leads to.
pub fn find_native_shape<V: BlockView + ?Sized>(view: &V, pos: IVec3, axis: Axis) -> PortalShapeBuilder {
    scan_frame(view, pos, axis, is_native_frame).into_builder(axis, pos)
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::dimension::DimensionId;
    use crate::portal::scan::tests::{test_world, build_frame};

    #[test]
    fn obsidian_only() {

        let mut world = test_world(DimensionId::OVERWORLD);
        build_frame(&mut world, IVec3::new(1, 5, 0), Axis::X, 2, 3, block::OBSIDIAN);
        build_frame(&mut world, IVec3::new(1, 5, 8), Axis::X, 2, 3, block::CRYING_OBSIDIAN);

        let builder = find_native_shape(&world, IVec3::new(0, 6, 0), Axis::X);
        assert!(builder.is_valid());
        assert!(!builder.is_bound());

        let builder = find_native_shape(&world, IVec3::new(0, 6, 8), Axis::X);
        assert!(!builder.is_valid());
        assert!(builder.is_bound());

    }

}
