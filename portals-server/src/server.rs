//! The multi-world server owning the dimension registry and dispatching portal triggers
//! to the worlds.

use glam::IVec3;
use indexmap::IndexMap;

use tracing::{debug, info, warn};

use portals::dimension::{DimensionId, DimensionRegistry};
use portals::world::World;
use portals::chunk::calc_chunk_pos;
use portals::portal::{ignite, forcer};
use portals::geom::{Axis, Face};
use portals::item::ItemStack;
use portals::block;

use crate::config::{self, DimensionConfig};


/// Coordinates in the nether are scaled by this factor relative to other dimensions.
pub const NETHER_COORDINATE_SCALE: i32 = 8;


/// Build the dimension registry from the configuration, the overworld and the nether are
/// always registered first.
pub fn registry_from_config() -> DimensionRegistry {
    registry_from_entries(config::namespace(), config::dimensions())
}

/// Build the dimension registry from the given tag namespace and the given raw list of
/// custom dimensions. Invalid entries are logged and skipped.
pub fn registry_from_entries(namespace: &str, raw_dimensions: &str) -> DimensionRegistry {

    let mut registry = DimensionRegistry::new(namespace).unwrap_or_else(|e| {
        warn!("invalid tag namespace '{namespace}', using the default one: {e}");
        DimensionRegistry::default()
    });

    registry.register_dimension(DimensionId::OVERWORLD);
    registry.register_dimension(DimensionId::NETHER);

    for entry in config::parse_dimensions(raw_dimensions) {
        match entry {
            Ok(config) => register_custom_dimension(&mut registry, config),
            Err(e) => warn!("skipping custom dimension: {e}"),
        }
    }

    registry

}

/// Register a configured custom dimension and its tags.
fn register_custom_dimension(registry: &mut DimensionRegistry, config: DimensionConfig) {

    let DimensionConfig { dimension, frame, igniter } = config;

    if !registry.register_dimension(dimension.clone()) {
        warn!("custom dimension {dimension} defined twice, replacing its tags");
    }

    if let Err(e) = registry.insert_frame_tag(&dimension, frame) {
        warn!("skipping frame of custom dimension {dimension}: {e}");
        return;
    }

    if !igniter.is_empty() {
        if let Err(e) = registry.insert_igniter_tag(&dimension, igniter) {
            warn!("skipping igniter of custom dimension {dimension}: {e}");
        }
    }

    info!("registered custom dimension {dimension}");

}

/// Get the coordinate scale of a dimension.
#[inline]
fn coordinate_scale(dimension: &DimensionId) -> i32 {
    if *dimension == DimensionId::NETHER { NETHER_COORDINATE_SCALE } else { 1 }
}

/// Scale a horizontal position from a dimension to another.
pub fn scale_position(pos: IVec3, from: &DimensionId, to: &DimensionId) -> IVec3 {
    let from_scale = coordinate_scale(from);
    let to_scale = coordinate_scale(to);
    IVec3::new(
        (pos.x * from_scale).div_euclid(to_scale),
        pos.y,
        (pos.z * from_scale).div_euclid(to_scale),
    )
}


/// The game mode of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    #[default]
    Survival,
    Creative,
    Adventure,
    Spectator,
}

/// A player interacting with the server's worlds.
#[derive(Debug, Clone)]
pub struct ServerPlayer {
    /// The username of that player.
    pub username: String,
    /// Spectators can't interact with blocks.
    pub game_mode: GameMode,
}

impl ServerPlayer {

    pub fn new(username: impl Into<String>, game_mode: GameMode) -> Self {
        Self { username: username.into(), game_mode }
    }

}


/// This structure manages a whole server and its worlds, one per loaded dimension, and
/// dispatches portal triggers to the right world.
pub struct Server {
    /// The registry of every loaded dimension and their portal tags.
    registry: DimensionRegistry,
    /// Worlds of this server, by dimension in registration order.
    worlds: IndexMap<DimensionId, World>,
}

impl Server {

    pub fn new(registry: DimensionRegistry) -> Self {
        Self {
            registry,
            worlds: IndexMap::new(),
        }
    }

    #[inline]
    pub fn get_registry(&self) -> &DimensionRegistry {
        &self.registry
    }

    /// Register a world in this server, the dimension is also loaded in the registry if
    /// needed. Any previous world of the same dimension is replaced.
    pub fn register_world(&mut self, dimension: DimensionId, min_y: i32, height: u32) {
        info!("registered world {dimension}, from y {min_y} with height {height}");
        self.registry.register_dimension(dimension.clone());
        self.worlds.insert(dimension.clone(), World::with_bounds(dimension, min_y, height));
    }

    pub fn get_world(&self, dimension: &DimensionId) -> Option<&World> {
        self.worlds.get(dimension)
    }

    pub fn get_world_mut(&mut self, dimension: &DimensionId) -> Option<&mut World> {
        self.worlds.get_mut(dimension)
    }

    /// Iterate over all worlds in registration order.
    pub fn iter_worlds(&self) -> impl Iterator<Item = &World> + '_ {
        self.worlds.values()
    }

    /// Handle a player using an item stack on the face of a block, return true if a
    /// portal has been lit with a custom igniter.
    pub fn handle_use_item(&mut self,
        dimension: &DimensionId,
        player: &ServerPlayer,
        stack: ItemStack,
        pos: IVec3,
        face: Face,
    ) -> bool {

        if player.game_mode == GameMode::Spectator {
            return false;
        }

        let Some(world) = self.worlds.get_mut(dimension) else {
            warn!("player {} used an item in unknown world {dimension}", player.username);
            return false;
        };

        let lit = ignite::use_igniter(world, &self.registry, stack, pos, face);
        if lit {
            info!("player {} lit a portal in {dimension} at {pos}", player.username);
        }

        lit

    }

    /// Handle a fire block placed in a world, return true if it lit a portal.
    pub fn handle_fire_placed(&mut self, dimension: &DimensionId, pos: IVec3) -> bool {

        let Some(world) = self.worlds.get_mut(dimension) else {
            warn!("fire placed in unknown world {dimension}");
            return false;
        };

        ignite::handle_fire_placed(world, &self.registry, pos)

    }

    /// Handle a traveler going through the portal at the given position, from a
    /// dimension to another one. The closest portal leading back to the departure
    /// dimension is searched in the destination, or a new one is built. The position of
    /// the arrival portal block is returned, none if the destination has no world.
    pub fn handle_travel(&mut self, from: &DimensionId, to: &DimensionId, pos: IVec3) -> Option<IVec3> {

        // The built portal has the same orientation as the departure one.
        let axis = match self.worlds.get(from).and_then(|world| world.get_block(pos)) {
            Some((block::PORTAL, metadata)) => Axis::from_metadata(metadata),
            _ => Axis::X,
        };

        let Some(world) = self.worlds.get_mut(to) else {
            warn!("travel from {from} to unknown world {to}");
            return None;
        };

        let mut target = scale_position(pos, from, to);
        target.y = target.y.clamp(world.get_min_y() + 1, world.get_max_y() - 4);

        let radius = if config::fast_search() {
            forcer::NETHER_SEARCH_RADIUS
        } else {
            forcer::search_radius(to)
        };

        if let Some(found) = forcer::find_closest_portal(world, &self.registry, target, radius, from) {
            debug!("travel from {from} to {to}, found portal at {found}");
            return Some(found);
        }

        load_chunks_around(world, target);
        let shape = forcer::create_portal(world, &self.registry, target, axis, from);
        info!("travel from {from} to {to}, created portal to {} at {target}", shape.dimension());
        Some(target)

    }

}

/// Load empty chunks around the given position, where a portal is about to be built.
/// Already loaded chunks are kept.
fn load_chunks_around(world: &mut World, pos: IVec3) {
    let (cx, cz) = calc_chunk_pos(pos);
    for dx in -1..=1 {
        for dz in -1..=1 {
            world.insert_empty_chunk(cx + dx, cz + dz);
        }
    }
}


#[cfg(test)]
mod tests {

    use super::*;
    use portals::world::BlockView;
    use portals::item;

    fn aether() -> DimensionId {
        DimensionId::parse("mymod:aether").unwrap()
    }

    fn server() -> Server {
        let registry = registry_from_entries("ssp", "mymod:aether=glowstone/water_bucket;bad;mymod:deep=crying_obsidian");
        let dimensions: Vec<_> = registry.iter_dimensions().cloned().collect();
        let mut server = Server::new(registry);
        for dimension in dimensions {
            server.register_world(dimension, 0, 64);
        }
        server
    }

    /// Build an empty frame of the given material with its interior at x 0..2, y 5..8.
    fn build_frame(world: &mut World, id: u8) {
        load_chunks_around(world, IVec3::new(0, 5, 0));
        for x in -1..=2 {
            for y in 4..=8 {
                let border = x == -1 || x == 2 || y == 4 || y == 8;
                world.set_block(IVec3::new(x, y, 0), if border { id } else { block::AIR }, 0);
            }
        }
    }

    #[test]
    fn registry_from_entries_skips_invalid() {

        let registry = server().registry;
        let dimensions: Vec<_> = registry.iter_dimensions().map(DimensionId::as_str).collect();
        assert_eq!(dimensions, ["minecraft:overworld", "minecraft:the_nether", "mymod:aether", "mymod:deep"]);
        assert_eq!(registry.get_namespace(), "ssp");
        assert!(registry.has_custom_igniter(&aether()));
        assert!(!registry.has_custom_igniter(&DimensionId::parse("mymod:deep").unwrap()));

        let fallback = registry_from_entries("Bad Namespace", "");
        assert_eq!(fallback.get_namespace(), "server_sided_portals");
        assert_eq!(fallback.iter_dimensions().count(), 2);

    }

    #[test]
    fn position_scaling() {
        let pos = IVec3::new(-17, 64, 100);
        assert_eq!(scale_position(pos, &DimensionId::OVERWORLD, &DimensionId::NETHER), IVec3::new(-3, 64, 12));
        assert_eq!(scale_position(pos, &DimensionId::NETHER, &DimensionId::OVERWORLD), IVec3::new(-136, 64, 800));
        assert_eq!(scale_position(pos, &DimensionId::OVERWORLD, &aether()), pos);
    }

    #[test]
    fn use_item_lights_custom_portal() {

        let mut server = server();
        build_frame(server.get_world_mut(&DimensionId::OVERWORLD).unwrap(), block::GLOWSTONE);

        let spectator = ServerPlayer::new("ghost", GameMode::Spectator);
        let player = ServerPlayer::new("steve", GameMode::Survival);
        let bucket = ItemStack::new(item::WATER_BUCKET);
        let clicked = IVec3::new(0, 4, 0);

        assert!(!server.handle_use_item(&DimensionId::OVERWORLD, &spectator, bucket, clicked, Face::PosY));
        assert!(!server.handle_use_item(&aether(), &player, bucket, clicked, Face::PosY));
        assert!(!server.handle_use_item(&DimensionId::parse("mymod:unknown").unwrap(), &player, bucket, clicked, Face::PosY));
        assert!(server.handle_use_item(&DimensionId::OVERWORLD, &player, bucket, clicked, Face::PosY));

        let world = server.get_world(&DimensionId::OVERWORLD).unwrap();
        assert_eq!(world.get_block_id(IVec3::new(1, 7, 0)), block::PORTAL);

    }

    #[test]
    fn fire_lights_native_portal() {

        let mut server = server();
        build_frame(server.get_world_mut(&DimensionId::NETHER).unwrap(), block::OBSIDIAN);

        assert!(!server.handle_fire_placed(&DimensionId::OVERWORLD, IVec3::new(0, 5, 0)));
        assert!(server.handle_fire_placed(&DimensionId::NETHER, IVec3::new(0, 5, 0)));

        let world = server.get_world(&DimensionId::NETHER).unwrap();
        assert_eq!(world.get_block_id(IVec3::new(0, 5, 0)), block::PORTAL);

    }

    #[test]
    fn travel_builds_then_reuses() {

        let mut server = server();

        // Departure portal in the aether, oriented along Z.
        let departure = IVec3::new(40, 20, 40);
        let aether_world = server.get_world_mut(&aether()).unwrap();
        load_chunks_around(aether_world, departure);
        aether_world.set_block(departure, block::PORTAL, Axis::Z.to_metadata());

        let arrival = server.handle_travel(&aether(), &DimensionId::OVERWORLD, departure).unwrap();
        assert_eq!(arrival, departure);

        let overworld = server.get_world(&DimensionId::OVERWORLD).unwrap();
        assert_eq!(overworld.get_block(arrival), Some((block::PORTAL, Axis::Z.to_metadata())));
        assert_eq!(portals::portal::find_portal_dimension(overworld, server.get_registry(), arrival), aether());

        // Traveling again reuses the existing portal.
        let again = server.handle_travel(&aether(), &DimensionId::OVERWORLD, departure + IVec3::new(3, 0, 3)).unwrap();
        assert_eq!(overworld_portal(&server, again), aether());

        // Coming from the nether, the aether portal is not a valid arrival.
        let from_nether = server.handle_travel(&DimensionId::NETHER, &DimensionId::OVERWORLD, IVec3::new(10, 20, 10)).unwrap();
        assert_eq!(from_nether, IVec3::new(80, 20, 80));
        assert_eq!(overworld_portal(&server, from_nether), DimensionId::NETHER);

        assert_eq!(server.handle_travel(&DimensionId::OVERWORLD, &DimensionId::parse("mymod:unknown").unwrap(), departure), None);

    }

    fn overworld_portal(server: &Server, pos: IVec3) -> DimensionId {
        let world = server.get_world(&DimensionId::OVERWORLD).unwrap();
        assert_eq!(world.get_block_id(pos), block::PORTAL);
        portals::portal::find_portal_dimension(world, server.get_registry(), pos)
    }

}
