//! Data structure for storing the blocks of a dimension's world at runtime.

use std::collections::HashMap;
use std::iter::FusedIterator;
use std::mem;

use glam::IVec3;

use tracing::trace;

use crate::chunk::{Chunk, calc_chunk_pos};
use crate::dimension::DimensionId;
use crate::util::JavaRandom;
use crate::block;


/// Default lowest block layer of a world.
pub const DEFAULT_MIN_Y: i32 = -64;
/// Default number of block layers of a world.
pub const DEFAULT_HEIGHT: u32 = 384;


/// Read access to blocks, this is the only surface needed to scan portal frames.
pub trait BlockView {

    /// Get block and metadata at given position, none if the position isn't loaded or
    /// outside of the world's height.
    fn get_block(&self, pos: IVec3) -> Option<(u8, u8)>;

    /// Get the lowest Y coordinate blocks can exist at.
    fn get_min_y(&self) -> i32;

    /// Get the block id at given position, positions that are not loaded read as air.
    #[inline]
    fn get_block_id(&self, pos: IVec3) -> u8 {
        self.get_block(pos).map_or(block::AIR, |(id, _)| id)
    }

}


/// A dimension's world, storing chunks of blocks between its minimum Y and height.
///
/// Chunks are not loaded automatically, a chunk must be present in order to set block
/// in the world, reading from a missing chunk returns no block.
///
/// Block changes can be listened to by swapping a `Vec<Event>` into the world using
/// [`World::swap_events`], events listening is disabled by default.
#[derive(Clone)]
pub struct World {
    /// When enabled, this contains the list of events that happened in the world since
    /// it was last swapped.
    events: Option<Vec<Event>>,
    /// The dimension this world is the content of.
    dimension: DimensionId,
    /// The lowest block layer.
    min_y: i32,
    /// The number of block layers.
    height: u32,
    /// The world's random number generator, used to randomize portal materials.
    rand: JavaRandom,
    /// The mapping of world chunks.
    chunks: HashMap<(i32, i32), Chunk>,
}

impl World {

    /// Create a new world of the given dimension with the default block layers.
    pub fn new(dimension: DimensionId) -> Self {
        Self::with_bounds(dimension, DEFAULT_MIN_Y, DEFAULT_HEIGHT)
    }

    /// Create a new world of the given dimension with custom block layers.
    pub fn with_bounds(dimension: DimensionId, min_y: i32, height: u32) -> Self {
        Self {
            events: None,
            dimension,
            min_y,
            height,
            rand: JavaRandom::new_seeded(),
            chunks: HashMap::new(),
        }
    }

    /// This function can be used to swap in a new events queue and return the previous
    /// one if relevant. Giving *None* events queue disable events registration.
    pub fn swap_events(&mut self, events: Option<Vec<Event>>) -> Option<Vec<Event>> {
        mem::replace(&mut self.events, events)
    }

    /// Push an event in this world, only if events are enabled.
    #[inline]
    fn push_event(&mut self, event: Event) {
        if let Some(events) = &mut self.events {
            events.push(event);
        }
    }

    /// Get the dimension of this world.
    pub fn get_dimension(&self) -> &DimensionId {
        &self.dimension
    }

    /// Get the lowest Y coordinate blocks can exist at.
    pub fn get_min_y(&self) -> i32 {
        self.min_y
    }

    /// Get the Y coordinate just above the highest block layer.
    pub fn get_max_y(&self) -> i32 {
        self.min_y + self.height as i32
    }

    /// Get a mutable access to this world's random number generator.
    pub fn get_rand_mut(&mut self) -> &mut JavaRandom {
        &mut self.rand
    }

    // =================== //
    //        CHUNKS       //
    // =================== //

    /// Insert an empty chunk at the given chunk coordinates, if no chunk is present.
    /// Return true if the chunk has been inserted.
    pub fn insert_empty_chunk(&mut self, cx: i32, cz: i32) -> bool {
        if self.contains_chunk(cx, cz) {
            return false;
        }
        trace!("insert empty chunk {cx}/{cz} in {}", self.dimension);
        self.chunks.insert((cx, cz), Chunk::new(self.min_y, self.height));
        true
    }

    /// Return true if a given chunk is present in the world.
    pub fn contains_chunk(&self, cx: i32, cz: i32) -> bool {
        self.chunks.contains_key(&(cx, cz))
    }

    /// Get a reference to a chunk, if existing.
    pub fn get_chunk(&self, cx: i32, cz: i32) -> Option<&Chunk> {
        self.chunks.get(&(cx, cz))
    }

    // =================== //
    //        BLOCKS       //
    // =================== //

    /// Set block and metadata at given position in the world, if the chunk is not
    /// loaded, none is returned, but if it is existing the previous block and metadata
    /// is returned. This function also push a block change event.
    pub fn set_block(&mut self, pos: IVec3, id: u8, metadata: u8) -> Option<(u8, u8)> {

        let (cx, cz) = calc_chunk_pos(pos);
        let chunk = self.chunks.get_mut(&(cx, cz))?;
        if !chunk.contains_y(pos.y) {
            return None;
        }

        let (prev_id, prev_metadata) = chunk.get_block(pos);
        if prev_id != id || prev_metadata != metadata {
            chunk.set_block(pos, id, metadata);
            self.push_event(Event::Block {
                pos,
                id,
                metadata,
                prev_id,
                prev_metadata,
            });
        }

        Some((prev_id, prev_metadata))

    }

    /// Get block and metadata at given position in the world, if the chunk is not
    /// loaded, none is returned.
    pub fn get_block(&self, pos: IVec3) -> Option<(u8, u8)> {
        let (cx, cz) = calc_chunk_pos(pos);
        let chunk = self.chunks.get(&(cx, cz))?;
        chunk.contains_y(pos.y).then(|| chunk.get_block(pos))
    }

    /// Set every block in the area between min and max (inclusive) to the given block,
    /// positions in missing chunks are ignored.
    pub fn fill_blocks(&mut self, min: IVec3, max: IVec3, id: u8, metadata: u8) {
        for x in min.x..=max.x {
            for z in min.z..=max.z {
                for y in min.y..=max.y {
                    self.set_block(IVec3::new(x, y, z), id, metadata);
                }
            }
        }
    }

    /// Iterate over all blocks in the given area, min is inclusive but max is exclusive.
    /// Blocks of missing chunks are yielded as air.
    #[inline]
    pub fn iter_blocks_in(&self, min: IVec3, max: IVec3) -> BlocksInIter<'_> {
        BlocksInIter::new(self, min, max)
    }

}

impl BlockView for World {

    #[inline]
    fn get_block(&self, pos: IVec3) -> Option<(u8, u8)> {
        World::get_block(self, pos)
    }

    #[inline]
    fn get_min_y(&self) -> i32 {
        self.min_y
    }

}


/// An event that happened in the world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A block has been changed in the world.
    Block {
        /// The block position.
        pos: IVec3,
        /// The new block id.
        id: u8,
        /// The new block metadata.
        metadata: u8,
        /// Previous block id.
        prev_id: u8,
        /// Previous block metadata.
        prev_metadata: u8,
    },
}


/// An iterator for blocks in a world area.
/// This yields the block position, id and metadata.
pub struct BlocksInIter<'a> {
    /// Back-reference to the containing world.
    world: &'a World,
    /// This contains a temporary reference to the chunk being analyzed. This is used to
    /// avoid repeatedly fetching chunks' map.
    chunk: Option<(i32, i32, Option<&'a Chunk>)>,
    /// Minimum coordinate to fetch.
    start: IVec3,
    /// Maximum coordinate to fetch (exclusive).
    end: IVec3,
    /// Next block to fetch.
    cursor: IVec3,
}

impl<'a> BlocksInIter<'a> {

    fn new(world: &'a World, mut start: IVec3, mut end: IVec3) -> Self {

        start.y = start.y.clamp(world.get_min_y(), world.get_max_y());
        end.y = end.y.clamp(world.get_min_y(), world.get_max_y());

        // If one component is empty, because max is exclusive, there will be no blocks
        // at all to read, so we set max to min so it will directly ends.
        if start.x >= end.x || start.y >= end.y || start.z >= end.z {
            end = start;
        }

        Self {
            world,
            chunk: None,
            start,
            end,
            cursor: start,
        }

    }

}

impl FusedIterator for BlocksInIter<'_> {}
impl Iterator for BlocksInIter<'_> {

    type Item = (IVec3, u8, u8);

    fn next(&mut self) -> Option<Self::Item> {

        // X is the last updated component, so when it reaches max it's done.
        if self.cursor.x == self.end.x {
            return None;
        }

        // We are at the start of a new column, update the chunk.
        if self.cursor.y == self.start.y {
            let (cx, cz) = calc_chunk_pos(self.cursor);
            if !matches!(self.chunk, Some((ccx, ccz, _)) if (ccx, ccz) == (cx, cz)) {
                self.chunk = Some((cx, cz, self.world.get_chunk(cx, cz)));
            }
        }

        let (id, metadata) = match self.chunk {
            Some((_, _, Some(chunk))) => chunk.get_block(self.cursor),
            _ => (block::AIR, 0),
        };

        let ret = (self.cursor, id, metadata);

        // Y is iterated first, columns are contiguous in chunks.
        self.cursor.y += 1;
        if self.cursor.y == self.end.y {
            self.cursor.y = self.start.y;
            self.cursor.z += 1;
            if self.cursor.z == self.end.z {
                self.cursor.z = self.start.z;
                self.cursor.x += 1;
            }
        }

        Some(ret)

    }

}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn blocks_and_events() {

        let mut world = World::with_bounds(DimensionId::OVERWORLD, 0, 128);
        let pos = IVec3::new(3, 10, -4);

        assert_eq!(world.set_block(pos, block::OBSIDIAN, 0), None);
        assert!(world.insert_empty_chunk(0, -1));
        assert!(!world.insert_empty_chunk(0, -1));

        world.swap_events(Some(Vec::new()));
        assert_eq!(world.set_block(pos, block::OBSIDIAN, 0), Some((block::AIR, 0)));
        assert_eq!(world.set_block(pos, block::OBSIDIAN, 0), Some((block::OBSIDIAN, 0)));
        assert_eq!(world.set_block(pos.with_y(128), block::OBSIDIAN, 0), None);
        assert_eq!(world.get_block(pos), Some((block::OBSIDIAN, 0)));
        assert_eq!(world.get_block(pos.with_y(-1)), None);

        let events = world.swap_events(None).unwrap();
        assert_eq!(events, [Event::Block { pos, id: block::OBSIDIAN, metadata: 0, prev_id: block::AIR, prev_metadata: 0 }]);

    }

    #[test]
    fn block_view_reads_air() {
        let world = World::new(DimensionId::OVERWORLD);
        assert_eq!(BlockView::get_min_y(&world), DEFAULT_MIN_Y);
        assert_eq!(world.get_block_id(IVec3::new(100, 0, 100)), block::AIR);
    }

    #[test]
    fn blocks_in_area() {

        let mut world = World::with_bounds(DimensionId::OVERWORLD, 0, 16);
        world.insert_empty_chunk(0, 0);
        world.fill_blocks(IVec3::new(0, 0, 0), IVec3::new(1, 1, 0), block::STONE, 0);

        let blocks: Vec<_> = world.iter_blocks_in(IVec3::new(0, 0, 0), IVec3::new(2, 2, 1)).collect();
        assert_eq!(blocks.len(), 4);
        assert!(blocks.iter().all(|&(_, id, _)| id == block::STONE));

        // Area crossing a missing chunk, and clamped to the world's layers.
        let count = world.iter_blocks_in(IVec3::new(-1, -5, 0), IVec3::new(1, 100, 1))
            .filter(|&(_, id, _)| id == block::STONE)
            .count();
        assert_eq!(count, 2);
        assert_eq!(world.iter_blocks_in(IVec3::new(-1, -5, 0), IVec3::new(1, 100, 1)).count(), 32);

        assert_eq!(world.iter_blocks_in(IVec3::ZERO, IVec3::ZERO).count(), 0);

    }

}
