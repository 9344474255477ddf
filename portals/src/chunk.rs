//! A chunk storing blocks of a world column, with a height given by its world.

use glam::IVec3;

use crate::block::AIR;


/// Chunk size in both X and Z coordinates.
pub const CHUNK_WIDTH: usize = 16;


/// Calculate the chunk position corresponding to the given block position. The Y
/// coordinate is ignored.
#[inline]
pub fn calc_chunk_pos(pos: IVec3) -> (i32, i32) {
    (pos.x >> 4, pos.z >> 4)
}


/// Data structure storing every chunk-local data, chunks are a world subdivision of
/// 16x16 columns of blocks, from the world's minimum Y up to its height.
#[derive(Clone)]
pub struct Chunk {
    /// The Y coordinate of the lowest block layer.
    min_y: i32,
    /// The number of block layers.
    height: u32,
    /// The numeric identifier of the block.
    block: Vec<u8>,
    /// Four bit metadata for each block.
    metadata: ChunkNibbleArray,
}

impl Chunk {

    /// Create a new chunk full of air blocks, spanning the given block layers.
    pub fn new(min_y: i32, height: u32) -> Self {
        let size = CHUNK_WIDTH * CHUNK_WIDTH * height as usize;
        Self {
            min_y,
            height,
            block: vec![AIR; size],
            metadata: ChunkNibbleArray::new(size),
        }
    }

    /// Return true if the given Y coordinate is within the block layers of this chunk.
    #[inline]
    pub fn contains_y(&self, y: i32) -> bool {
        y >= self.min_y && ((y - self.min_y) as u32) < self.height
    }

    /// Calculate the index in the chunk's arrays for the given global position, layout
    /// is `x, z, y` from most to least significant so that columns are contiguous.
    #[inline]
    fn calc_index(&self, pos: IVec3) -> usize {
        debug_assert!(self.contains_y(pos.y), "y coordinate out of chunk");
        let x = (pos.x & 0b1111) as usize;
        let z = (pos.z & 0b1111) as usize;
        let y = (pos.y - self.min_y) as usize;
        (x * CHUNK_WIDTH + z) * self.height as usize + y
    }

    /// Get block id and metadata at the given global position (rebased to chunk-local).
    /// Panics if Y component of the position is not within the chunk's layers.
    #[inline]
    pub fn get_block(&self, pos: IVec3) -> (u8, u8) {
        let index = self.calc_index(pos);
        (self.block[index], self.metadata.get(index))
    }

    /// Set block id and metadata at the given global position (rebased to chunk-local).
    /// Panics if Y component of the position is not within the chunk's layers.
    #[inline]
    pub fn set_block(&mut self, pos: IVec3, id: u8, metadata: u8) {
        let index = self.calc_index(pos);
        self.block[index] = id;
        self.metadata.set(index, metadata);
    }

}


/// Special arrays for chunks that stores `u4` values, two per byte.
#[derive(Clone)]
struct ChunkNibbleArray {
    inner: Vec<u8>,
}

impl ChunkNibbleArray {

    fn new(size: usize) -> Self {
        Self { inner: vec![0; size.div_ceil(2)] }
    }

    #[inline]
    fn get(&self, index: usize) -> u8 {
        let slot = self.inner[index >> 1];
        if index & 1 == 0 {
            slot & 0x0F
        } else {
            (slot & 0xF0) >> 4
        }
    }

    #[inline]
    fn set(&mut self, index: usize, value: u8) {
        debug_assert!(value <= 0x0F);
        let slot = &mut self.inner[index >> 1];
        if index & 1 == 0 {
            *slot = (*slot & 0xF0) | value;
        } else {
            *slot = (*slot & 0x0F) | (value << 4);
        }
    }

}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::block;

    #[test]
    fn chunk_pos() {
        assert_eq!(calc_chunk_pos(IVec3::new(0, 5, 15)), (0, 0));
        assert_eq!(calc_chunk_pos(IVec3::new(-1, 5, 16)), (-1, 1));
        assert_eq!(calc_chunk_pos(IVec3::new(-17, -64, 33)), (-2, 2));
    }

    #[test]
    fn negative_layers() {

        let mut chunk = Chunk::new(-64, 384);
        assert!(chunk.contains_y(-64));
        assert!(chunk.contains_y(319));
        assert!(!chunk.contains_y(320));
        assert!(!chunk.contains_y(-65));

        let low = IVec3::new(-1, -64, -16);
        let high = IVec3::new(3, 319, 7);
        chunk.set_block(low, block::OBSIDIAN, 0);
        chunk.set_block(high, block::PORTAL, 1);
        assert_eq!(chunk.get_block(low), (block::OBSIDIAN, 0));
        assert_eq!(chunk.get_block(high), (block::PORTAL, 1));
        assert_eq!(chunk.get_block(high - IVec3::Y), (block::AIR, 0));

    }

}
