//! The portal forcer, finding or building the portal a traveler arrives through.
//!
//! The dimension the traveler departs from is always given explicitly: in the overworld
//! it selects which portals are acceptable arrival points, and everywhere it selects
//! the frame material of built portals.

use glam::IVec3;

use tracing::debug;

use crate::dimension::{DimensionId, DimensionRegistry};
use crate::world::World;
use crate::geom::Axis;
use crate::block;

use super::resolve::{find_portal_shape, is_portal_for_dimension};
use super::shape::PortalShape;


/// Search radius for existing portals in the nether.
pub const NETHER_SEARCH_RADIUS: i32 = 16;
/// Search radius for existing portals in any other dimension.
pub const DEFAULT_SEARCH_RADIUS: i32 = 128;


/// Get the radius to search existing portals in when arriving in the given dimension.
#[inline]
pub fn search_radius(dimension: &DimensionId) -> i32 {
    if *dimension == DimensionId::NETHER {
        NETHER_SEARCH_RADIUS
    } else {
        DEFAULT_SEARCH_RADIUS
    }
}

/// Pick the frame block of a portal built in the given world for a traveler coming from
/// the departure dimension. The departure's own frame is used if it is a custom
/// dimension, the world's frame otherwise, obsidian if neither has a custom frame.
pub fn frame_block_for(registry: &DimensionRegistry, world: &mut World, departure: &DimensionId) -> u8 {
    let dimension = if registry.has_custom_frame(departure) {
        departure.clone()
    } else {
        world.get_dimension().clone()
    };
    registry.sample_frame_block(&dimension, world.get_rand_mut())
}

/// Build a 2x3 portal whose first interior block is at the given position, with its
/// frame and a platform below, and return its shape. The area around the portal is
/// cleared and the chunks around it must be loaded.
pub fn create_portal(world: &mut World, registry: &DimensionRegistry, pos: IVec3, axis: Axis, departure: &DimensionId) -> PortalShape {

    let dir = axis.positive();
    let side = dir.rotate_right();

    // Platform on both sides of the portal, with some air above.
    for i in -1..=1 {
        for j in 0..=1 {
            for k in -1..=2 {
                let block_pos = side.offset(dir.offset(pos, j), i) + IVec3::new(0, k, 0);
                let id = if k < 0 { frame_block_for(registry, world, departure) } else { block::AIR };
                world.set_block(block_pos, id, 0);
            }
        }
    }

    for l in -1..=2 {
        for h in -1..=3 {
            if l == -1 || l == 2 || h == -1 || h == 3 {
                let id = frame_block_for(registry, world, departure);
                world.set_block(dir.offset(pos, l) + IVec3::new(0, h, 0), id, 0);
            }
        }
    }

    let metadata = axis.to_metadata();
    for l in 0..2 {
        for h in 0..3 {
            world.set_block(dir.offset(pos, l) + IVec3::new(0, h, 0), block::PORTAL, metadata);
        }
    }

    let shape = find_portal_shape(world, registry, pos, axis);
    debug!("created portal to {} at {pos} in {}, coming from {departure}", shape.dimension(), world.get_dimension());
    shape

}

/// Find the closest portal block around the given position, within a square of the
/// given radius and the whole world's height. When searching in the overworld, only
/// portals leading back to the departure dimension are considered. Ties are broken by
/// the lowest position.
pub fn find_closest_portal(world: &World, registry: &DimensionRegistry, pos: IVec3, radius: i32, departure: &DimensionId) -> Option<IVec3> {

    let min = IVec3::new(pos.x - radius, world.get_min_y(), pos.z - radius);
    let max = IVec3::new(pos.x + radius + 1, world.get_max_y(), pos.z + radius + 1);
    let in_overworld = *world.get_dimension() == DimensionId::OVERWORLD;

    world.iter_blocks_in(min, max)
        .filter(|&(_, id, _)| id == block::PORTAL)
        .map(|(portal_pos, _, _)| portal_pos)
        .filter(|&portal_pos| !in_overworld || is_portal_for_dimension(world, registry, portal_pos, departure))
        .min_by_key(|&portal_pos| ((portal_pos - pos).length_squared(), portal_pos.y))

}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::world::BlockView;
    use crate::portal::scan::tests::test_world;

    fn aether() -> DimensionId {
        DimensionId::parse("mymod:aether").unwrap()
    }

    fn registry() -> DimensionRegistry {
        let mut registry = DimensionRegistry::default();
        registry.register_dimension(DimensionId::OVERWORLD);
        registry.register_dimension(DimensionId::NETHER);
        registry.register_dimension(aether());
        registry.insert_frame_tag(&aether(), [block::GLOWSTONE, block::QUARTZ_BLOCK]).unwrap();
        registry
    }

    #[test]
    fn radius() {
        assert_eq!(search_radius(&DimensionId::NETHER), 16);
        assert_eq!(search_radius(&DimensionId::OVERWORLD), 128);
        assert_eq!(search_radius(&aether()), 128);
    }

    #[test]
    fn frame_material() {

        let registry = registry();
        let mut overworld = test_world(DimensionId::OVERWORLD);
        let mut aether_world = test_world(aether());

        assert_eq!(frame_block_for(&registry, &mut overworld, &DimensionId::NETHER), block::OBSIDIAN);

        // Coming from a custom dimension, or arriving in one.
        for _ in 0..16 {
            for id in [
                frame_block_for(&registry, &mut overworld, &aether()),
                frame_block_for(&registry, &mut aether_world, &DimensionId::OVERWORLD),
            ] {
                assert!(id == block::GLOWSTONE || id == block::QUARTZ_BLOCK);
            }
        }

    }

    #[test]
    fn created_portal_leads_back() {

        let registry = registry();

        for (departure, expected) in [(aether(), aether()), (DimensionId::NETHER, DimensionId::NETHER)] {
            for axis in [Axis::X, Axis::Z] {

                let mut world = test_world(DimensionId::OVERWORLD);
                let pos = IVec3::new(3, 10, -4);
                let shape = create_portal(&mut world, &registry, pos, axis, &departure);

                assert!(shape.is_valid());
                assert!(shape.is_complete());
                assert_eq!((shape.width(), shape.height()), (2, 3));
                assert_eq!(shape.axis(), axis);
                assert_eq!(shape.dimension(), &expected);

                assert_eq!(world.get_block(pos), Some((block::PORTAL, axis.to_metadata())));
                assert_ne!(world.get_block_id(pos - IVec3::Y), block::AIR);
                // The platform extends on both sides of the portal.
                let side = axis.positive().rotate_right();
                assert_ne!(world.get_block_id(side.offset(pos, 1) - IVec3::Y), block::AIR);
                assert_ne!(world.get_block_id(side.offset(pos, -1) - IVec3::Y), block::AIR);
                assert_eq!(world.get_block_id(side.offset(pos, 1)), block::AIR);

            }
        }

    }

    #[test]
    fn closest_portal_in_overworld() {

        let registry = registry();
        let mut world = test_world(DimensionId::OVERWORLD);

        let native = create_portal(&mut world, &registry, IVec3::new(2, 5, 2), Axis::X, &DimensionId::NETHER);
        let custom = create_portal(&mut world, &registry, IVec3::new(-20, 5, -20), Axis::Z, &aether());
        assert_eq!(native.dimension(), &DimensionId::NETHER);
        assert_eq!(custom.dimension(), &aether());

        let origin = IVec3::new(0, 5, 0);
        assert_eq!(find_closest_portal(&world, &registry, origin, 31, &DimensionId::NETHER), Some(IVec3::new(2, 5, 2)));
        assert_eq!(find_closest_portal(&world, &registry, origin, 31, &aether()), Some(IVec3::new(-20, 5, -19)));
        assert_eq!(find_closest_portal(&world, &registry, origin, 8, &aether()), None);
        assert_eq!(find_closest_portal(&world, &registry, origin, 31, &DimensionId::parse("mymod:unknown").unwrap()), None);

    }

    #[test]
    fn closest_portal_elsewhere() {

        let registry = registry();
        let mut world = test_world(DimensionId::NETHER);

        create_portal(&mut world, &registry, IVec3::new(5, 20, 0), Axis::X, &DimensionId::OVERWORLD);
        create_portal(&mut world, &registry, IVec3::new(-6, 24, 0), Axis::X, &DimensionId::OVERWORLD);

        // Outside the overworld any portal is accepted, the lowest one wins a tie.
        let found = find_closest_portal(&world, &registry, IVec3::new(0, 23, 0), NETHER_SEARCH_RADIUS, &aether());
        assert_eq!(found, Some(IVec3::new(5, 22, 0)));

    }

}
