//! Resolution of the dimension a portal frame leads to, reconciling the native obsidian
//! detector with the frames of every custom dimension.

use glam::IVec3;

use tracing::trace;

use crate::dimension::{DimensionId, DimensionRegistry};
use crate::world::World;
use crate::geom::Axis;
use crate::block;

use super::native::find_native_shape;
use super::scan::{scan_frame, FrameScan};
use super::shape::{PortalShape, PortalShapeBuilder};


/// Find the portal shape around the given position for the given axis, bound to the
/// dimension it leads to.
///
/// Obsidian frames lead to the nether, unless the world is itself a custom dimension
/// in which case they are invalid. When the native detector fails in the overworld or
/// in a custom dimension, the frames of custom dimensions are tried in registration
/// order and the first one forming a valid shape wins. Shapes that match nothing are
/// invalid and carry the nether as a sentinel dimension.
pub fn find_portal_shape(world: &World, registry: &DimensionRegistry, pos: IVec3, axis: Axis) -> PortalShape {

    let world_dimension = world.get_dimension();
    let world_custom = registry.is_custom_dimension(world_dimension);

    let mut native = find_native_shape(world, pos, axis);
    if native.is_valid() {

        if world_custom {
            trace!("native portal at {pos} suppressed in custom dimension {world_dimension}");
            return PortalShapeBuilder::invalid(axis, pos).build();
        }

        native.bind(DimensionId::NETHER).expect("valid native shape should be unbound");
        return native.build();

    }

    if *world_dimension != DimensionId::OVERWORLD && !world_custom {
        return native.build();
    }

    let mut last_scan = FrameScan::default();

    for (dimension, tag) in registry.iter_custom_frames() {

        let scan = scan_frame(world, pos, axis, |id| tag.contains(id));
        if scan.is_valid() {
            trace!("portal at {pos} matched the frame of {dimension}: {scan:?}");
            let mut builder = scan.into_builder(axis, pos);
            builder.bind(dimension.clone()).expect("valid custom shape should be unbound");
            return builder.build();
        }

        last_scan = scan;

    }

    last_scan.into_builder(axis, pos).build()

}

/// Find a valid portal shape without any portal block inside, trying the given axis
/// first and then the other one. This is the shape that can be lit.
pub fn find_empty_portal_shape(world: &World, registry: &DimensionRegistry, pos: IVec3, axis: Axis) -> Option<PortalShape> {
    [axis, axis.other()].into_iter()
        .map(|axis| find_portal_shape(world, registry, pos, axis))
        .find(|shape| shape.is_valid() && shape.portal_blocks() == 0)
}

/// Get the dimension the portal at the given position leads to. The axis is read from
/// the portal block at that position, the X axis is used for any other block.
pub fn find_portal_dimension(world: &World, registry: &DimensionRegistry, pos: IVec3) -> DimensionId {

    let axis = match world.get_block(pos) {
        Some((block::PORTAL, metadata)) => Axis::from_metadata(metadata),
        _ => Axis::X,
    };

    find_portal_shape(world, registry, pos, axis).dimension().clone()

}

/// Return true if the portal at the given position leads to the given dimension.
pub fn is_portal_for_dimension(world: &World, registry: &DimensionRegistry, pos: IVec3, dimension: &DimensionId) -> bool {
    find_portal_dimension(world, registry, pos) == *dimension
}

/// Return true if the portal at the given position leads to a custom dimension.
pub fn is_custom_portal(world: &World, registry: &DimensionRegistry, pos: IVec3) -> bool {
    registry.has_custom_frame(&find_portal_dimension(world, registry, pos))
}
