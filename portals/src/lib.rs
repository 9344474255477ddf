//! Custom dimension portals for a voxel game server: frame detection, dimension
//! resolution and the portal behaviors built on top of them.

pub mod util;
pub mod geom;

pub mod block;
pub mod item;

pub mod tag;
pub mod dimension;

pub mod chunk;
pub mod world;

pub mod portal;
