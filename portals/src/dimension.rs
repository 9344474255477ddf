//! Dimension identifiers and the registry of loaded dimensions with their custom portal
//! frame and igniter tags.
//!
//! A dimension is *custom* when a frame tag is registered for it. Tags follow a naming
//! convention derived from the dimension's path: the frame tag of `mymod:aether` is
//! `<namespace>:aether_portal_frame` and its igniter tag is
//! `<namespace>:aether_portal_igniter`, where the namespace is the registry's one.

use std::fmt;

use arcstr::ArcStr;
use indexmap::{IndexMap, IndexSet};
use thiserror::Error;

use crate::tag::{self, BlockTag, ItemTag, ParseIdError, TagKey};
use crate::util::JavaRandom;
use crate::block;


/// Default namespace of frame and igniter tags.
pub const DEFAULT_TAG_NAMESPACE: &str = "server_sided_portals";


/// The resource location identifying a dimension, such as `minecraft:overworld`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DimensionId(ArcStr);

impl DimensionId {

    /// The default world, where players spawn and where every portal leads back.
    pub const OVERWORLD: Self = Self(arcstr::literal!("minecraft:overworld"));
    /// The dimension reached through native obsidian portals, this is also the sentinel
    /// dimension of shapes that matched nothing.
    pub const NETHER: Self = Self(arcstr::literal!("minecraft:the_nether"));

    /// Parse a dimension id from its `namespace:path` representation.
    pub fn parse(raw: &str) -> Result<Self, ParseIdError> {
        tag::parse_location(raw).map(Self)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the path part of the location, after the namespace.
    pub fn path(&self) -> &str {
        self.0.split_once(':').map_or(&self.0[..], |(_, path)| path)
    }

}

impl fmt::Display for DimensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}


/// Error returned when registering tags.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("dimension {0} is not registered")]
    UnknownDimension(DimensionId),
    #[error("tag {0} has no value")]
    EmptyTag(TagKey),
    #[error("invalid tag namespace: {0}")]
    Namespace(#[from] ParseIdError),
}


/// The registry of every loaded dimension, in registration order, with the block and
/// item tags that make some of them custom portal dimensions.
#[derive(Debug, Clone)]
pub struct DimensionRegistry {
    /// Namespace of all frame and igniter tags.
    namespace: ArcStr,
    /// Loaded dimensions, the order of this set is the order custom dimensions are
    /// matched against a frame, first match wins.
    dimensions: IndexSet<DimensionId>,
    /// Registered block tags.
    block_tags: IndexMap<TagKey, BlockTag>,
    /// Registered item tags.
    item_tags: IndexMap<TagKey, ItemTag>,
}

impl Default for DimensionRegistry {
    fn default() -> Self {
        Self {
            namespace: ArcStr::from(DEFAULT_TAG_NAMESPACE),
            dimensions: IndexSet::new(),
            block_tags: IndexMap::new(),
            item_tags: IndexMap::new(),
        }
    }
}

impl DimensionRegistry {

    /// Create a new empty registry whose tags live in the given namespace.
    pub fn new(namespace: &str) -> Result<Self, RegistryError> {

        // Validate the namespace alone by parsing a location made of it.
        let location = tag::parse_location(&format!("{namespace}:portal"))?;
        let namespace = location.split_once(':').map_or("", |(ns, _)| ns);

        Ok(Self {
            namespace: ArcStr::from(namespace),
            ..Self::default()
        })

    }

    /// Get the namespace of frame and igniter tags.
    pub fn get_namespace(&self) -> &str {
        &self.namespace
    }

    /// Register a loaded dimension, returning false if it was already registered, in
    /// which case its position in the iteration order is unchanged.
    pub fn register_dimension(&mut self, dimension: DimensionId) -> bool {
        self.dimensions.insert(dimension)
    }

    /// Return true if the dimension is loaded.
    pub fn contains_dimension(&self, dimension: &DimensionId) -> bool {
        self.dimensions.contains(dimension)
    }

    /// Iterate over all loaded dimensions, in registration order.
    pub fn iter_dimensions(&self) -> indexmap::set::Iter<'_, DimensionId> {
        self.dimensions.iter()
    }

    /// Get the key of the frame tag for the given dimension.
    pub fn frame_tag_key(&self, dimension: &DimensionId) -> TagKey {
        self.make_tag_key(dimension, "portal_frame")
    }

    /// Get the key of the igniter tag for the given dimension.
    pub fn igniter_tag_key(&self, dimension: &DimensionId) -> TagKey {
        self.make_tag_key(dimension, "portal_igniter")
    }

    fn make_tag_key(&self, dimension: &DimensionId, suffix: &str) -> TagKey {
        // Both parts are already validated, and the suffix is a valid path.
        TagKey::new_unchecked(ArcStr::from(format!("{}:{}_{suffix}", self.namespace, dimension.path())))
    }

    /// Register the frame blocks of a loaded dimension, making it a custom portal
    /// dimension. Any previous frame tag for this dimension is replaced.
    pub fn insert_frame_tag(&mut self,
        dimension: &DimensionId,
        blocks: impl IntoIterator<Item = u8>
    ) -> Result<&BlockTag, RegistryError> {

        if !self.contains_dimension(dimension) {
            return Err(RegistryError::UnknownDimension(dimension.clone()));
        }

        let key = self.frame_tag_key(dimension);
        let tag = BlockTag::new(key.clone(), blocks);
        if tag.is_empty() {
            return Err(RegistryError::EmptyTag(key));
        }

        self.block_tags.insert(key.clone(), tag);
        Ok(&self.block_tags[&key])

    }

    /// Register the igniter items of a loaded dimension. Any previous igniter tag for
    /// this dimension is replaced.
    pub fn insert_igniter_tag(&mut self,
        dimension: &DimensionId,
        items: impl IntoIterator<Item = u16>
    ) -> Result<&ItemTag, RegistryError> {

        if !self.contains_dimension(dimension) {
            return Err(RegistryError::UnknownDimension(dimension.clone()));
        }

        let key = self.igniter_tag_key(dimension);
        let tag = ItemTag::new(key.clone(), items);
        if tag.is_empty() {
            return Err(RegistryError::EmptyTag(key));
        }

        self.item_tags.insert(key.clone(), tag);
        Ok(&self.item_tags[&key])

    }

    /// Get the frame blocks of a dimension, if it is a custom portal dimension.
    pub fn get_frame_tag(&self, dimension: &DimensionId) -> Option<&BlockTag> {
        self.block_tags.get(&self.frame_tag_key(dimension))
    }

    /// Get the igniter items of a dimension, if any are registered.
    pub fn get_igniter_tag(&self, dimension: &DimensionId) -> Option<&ItemTag> {
        self.item_tags.get(&self.igniter_tag_key(dimension))
    }

    /// Return true if the dimension has its own portal frame.
    #[inline]
    pub fn has_custom_frame(&self, dimension: &DimensionId) -> bool {
        self.get_frame_tag(dimension).is_some()
    }

    /// Return true if the dimension has its own portal igniter items.
    #[inline]
    pub fn has_custom_igniter(&self, dimension: &DimensionId) -> bool {
        self.get_igniter_tag(dimension).is_some()
    }

    /// Return true if the dimension is a loaded custom portal dimension.
    pub fn is_custom_dimension(&self, dimension: &DimensionId) -> bool {
        self.contains_dimension(dimension) && self.has_custom_frame(dimension)
    }

    /// Iterate over the loaded dimensions that have a custom frame, in registration
    /// order.
    pub fn iter_dimensions_with_frame(&self) -> impl Iterator<Item = &DimensionId> + '_ {
        self.dimensions.iter().filter(|dimension| self.has_custom_frame(dimension))
    }

    /// Iterate over the loaded custom dimensions together with their frame tag, in
    /// registration order.
    pub fn iter_custom_frames(&self) -> impl Iterator<Item = (&DimensionId, &BlockTag)> + '_ {
        self.dimensions.iter()
            .filter_map(|dimension| Some((dimension, self.get_frame_tag(dimension)?)))
    }

    /// Find the first custom dimension whose frame contains the given block.
    pub fn find_frame_dimension(&self, block_id: u8) -> Option<&DimensionId> {
        self.iter_custom_frames()
            .find(|(_, tag)| tag.contains(block_id))
            .map(|(dimension, _)| dimension)
    }

    /// Find the first custom dimension whose igniter tag contains the given item.
    pub fn find_igniter_dimension(&self, item_id: u16) -> Option<&DimensionId> {
        self.iter_dimensions_with_frame()
            .find(|dimension| self.get_igniter_tag(dimension).is_some_and(|tag| tag.contains(item_id)))
    }

    /// Return true if the block belongs to the frame of any custom dimension.
    pub fn is_custom_frame_block(&self, block_id: u8) -> bool {
        self.find_frame_dimension(block_id).is_some()
    }

    /// Draw a random block from the dimension's frame tag, obsidian if the dimension
    /// has no custom frame.
    pub fn sample_frame_block(&self, dimension: &DimensionId, rand: &mut JavaRandom) -> u8 {
        self.get_frame_tag(dimension)
            .and_then(|tag| tag.sample(rand))
            .unwrap_or(block::OBSIDIAN)
    }

}
