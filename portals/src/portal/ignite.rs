//! Lighting portals, either with the igniter item of a custom dimension or with fire.

use glam::IVec3;

use tracing::debug;

use crate::dimension::{DimensionId, DimensionRegistry};
use crate::world::{BlockView, World};
use crate::geom::{Axis, Face};
use crate::item::ItemStack;
use crate::block;

use super::resolve::find_empty_portal_shape;


/// Return the custom dimension both the frame block and the igniter item belong to,
/// none if either doesn't belong to any custom dimension or if they belong to
/// different ones.
pub fn can_ignite(registry: &DimensionRegistry, frame_block: u8, igniter_item: u16) -> Option<&DimensionId> {
    let frame_dimension = registry.find_frame_dimension(frame_block)?;
    let igniter_dimension = registry.find_igniter_dimension(igniter_item)?;
    (frame_dimension == igniter_dimension).then_some(frame_dimension)
}

/// Use an igniter item stack on the given face of a block. The portal is lit only if
/// the clicked block and the item belong to the same custom dimension and if an empty
/// frame of that dimension is found next to the clicked face. Return true if a portal
/// has been lit.
pub fn use_igniter(world: &mut World, registry: &DimensionRegistry, stack: ItemStack, pos: IVec3, face: Face) -> bool {

    if stack.is_empty() {
        return false;
    }

    let Some(dimension) = can_ignite(registry, world.get_block_id(pos), stack.id) else {
        return false;
    };

    let Some(shape) = find_empty_portal_shape(world, registry, face.offset(pos, 1), Axis::X) else {
        return false;
    };

    if shape.dimension() != dimension {
        debug!("igniter of {dimension} used on a frame of {}", shape.dimension());
        return false;
    }

    debug!("portal to {dimension} lit at {}, size {}x{}", shape.bottom_left(), shape.width(), shape.height());
    shape.create_portal_blocks(world);
    true

}

/// Return true if fire can light portals in the given dimension, this is the case of
/// the overworld, the nether and every dimension having a custom frame.
pub fn is_portal_dimension(registry: &DimensionRegistry, dimension: &DimensionId) -> bool {
    *dimension == DimensionId::OVERWORLD
        || *dimension == DimensionId::NETHER
        || registry.has_custom_frame(dimension)
}

/// Return true if a fire placed at the given position, against the given face, would
/// open a portal. A frame block must be next to the fire, the portal axis derives from
/// the face or is random for vertical faces.
pub fn can_fire_open_portal(world: &mut World, registry: &DimensionRegistry, pos: IVec3, face: Face) -> bool {

    if !is_portal_dimension(registry, world.get_dimension()) {
        return false;
    }

    let near_frame = Face::ALL.into_iter().any(|neighbor| {
        let id = world.get_block_id(neighbor.offset(pos, 1));
        id == block::OBSIDIAN || registry.is_custom_frame_block(id)
    });

    if !near_frame {
        return false;
    }

    let axis = match Axis::from_face(face.rotate_left()) {
        Some(axis) => axis,
        None => world.get_rand_mut().next_choice(&[Axis::X, Axis::Z]),
    };

    find_empty_portal_shape(world, registry, pos, axis).is_some()

}

/// Handle a fire block just placed at the given position, lighting the empty frame
/// around it unless the frame's dimension requires its own igniter. Return true if a
/// portal has been lit.
pub fn handle_fire_placed(world: &mut World, registry: &DimensionRegistry, pos: IVec3) -> bool {

    if !is_portal_dimension(registry, world.get_dimension()) {
        return false;
    }

    match find_empty_portal_shape(world, registry, pos, Axis::X) {
        Some(shape) if !registry.has_custom_igniter(shape.dimension()) => {
            debug!("portal to {} lit by fire at {pos}", shape.dimension());
            shape.create_portal_blocks(world);
            true
        }
        _ => false
    }

}
