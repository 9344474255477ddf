//! A host server for custom dimension portals, configured from the environment.

use tracing::info;
use tracing_subscriber::EnvFilter;

use portals::world::{DEFAULT_MIN_Y, DEFAULT_HEIGHT};
use portals::{block, item};

pub mod config;
pub mod server;


pub fn main() {

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    let registry = server::registry_from_config();
    let dimensions: Vec<_> = registry.iter_dimensions().cloned().collect();

    let mut server = server::Server::new(registry);
    for dimension in dimensions {
        server.register_world(dimension, DEFAULT_MIN_Y, DEFAULT_HEIGHT);
    }

    let registry = server.get_registry();
    for world in server.iter_worlds() {

        let dimension = world.get_dimension();
        let Some(frame) = registry.get_frame_tag(dimension) else {
            info!("{dimension}: no custom portal");
            continue;
        };

        let frame_names: Vec<_> = frame.iter().map(block::name).collect();
        let igniter_names: Vec<_> = registry.get_igniter_tag(dimension)
            .map(|tag| tag.iter().map(item::name).collect())
            .unwrap_or_default();

        info!("{dimension}: frame {} {frame_names:?}, igniter {igniter_names:?}", frame.key());

    }

    if config::fast_search() {
        info!("fast portal search enabled");
    }

}
