//! Named sets of blocks or items, the data-driven way of telling which blocks build the
//! frame of a dimension's portal and which items ignite it.

use std::hash::Hash;
use std::fmt;

use arcstr::ArcStr;
use indexmap::IndexSet;
use thiserror::Error;

use crate::util::JavaRandom;


/// The namespace used when a resource location doesn't specify one.
pub const DEFAULT_NAMESPACE: &str = "minecraft";


/// Validate a `namespace:path` resource location, the namespace defaults to
/// `minecraft` when absent. The normalized location is returned.
pub(crate) fn parse_location(raw: &str) -> Result<ArcStr, ParseIdError> {

    let (namespace, path) = match raw.split_once(':') {
        Some((namespace, path)) => (namespace, path),
        None => (DEFAULT_NAMESPACE, raw),
    };

    if namespace.is_empty() || path.is_empty() {
        return Err(ParseIdError::Empty(raw.to_string()));
    }

    let valid_namespace = namespace.bytes()
        .all(|b| matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' | b'.'));
    let valid_path = path.bytes()
        .all(|b| matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' | b'.' | b'/'));

    if !valid_namespace || !valid_path {
        return Err(ParseIdError::IllegalCharacter(raw.to_string()));
    }

    Ok(ArcStr::from(format!("{namespace}:{path}")))

}


/// Error returned when a resource location can't be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseIdError {
    #[error("empty namespace or path in resource location '{0}'")]
    Empty(String),
    #[error("illegal character in resource location '{0}'")]
    IllegalCharacter(String),
}


/// The resource location naming a tag, such as `server_sided_portals:aether_portal_frame`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagKey(ArcStr);

impl TagKey {

    /// Parse a tag key from its `namespace:path` representation.
    pub fn parse(raw: &str) -> Result<Self, ParseIdError> {
        parse_location(raw).map(Self)
    }

    /// Create a tag key from an already validated resource location.
    #[inline]
    pub(crate) fn new_unchecked(location: ArcStr) -> Self {
        Self(location)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl fmt::Display for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}


/// An ordered set of values under a tag key. Order is the insertion order and is only
/// relevant to random sampling.
#[derive(Debug, Clone)]
pub struct Tag<T> {
    key: TagKey,
    values: IndexSet<T>,
}

/// A tag of block ids.
pub type BlockTag = Tag<u8>;
/// A tag of item ids.
pub type ItemTag = Tag<u16>;

impl<T: Copy + Hash + Eq> Tag<T> {

    pub fn new(key: TagKey, values: impl IntoIterator<Item = T>) -> Self {
        Self {
            key,
            values: values.into_iter().collect(),
        }
    }

    #[inline]
    pub fn key(&self) -> &TagKey {
        &self.key
    }

    #[inline]
    pub fn contains(&self, value: T) -> bool {
        self.values.contains(&value)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.values.iter().copied()
    }

    /// Draw a uniformly random value from this tag, none if the tag is empty.
    pub fn sample(&self, rand: &mut JavaRandom) -> Option<T> {
        if self.values.is_empty() {
            return None;
        }
        let index = rand.next_int_bounded(self.values.len() as i32) as usize;
        self.values.get_index(index).copied()
    }

}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::block;

    #[test]
    fn parse_keys() {
        assert_eq!(TagKey::parse("ssp:aether_portal_frame").unwrap().as_str(), "ssp:aether_portal_frame");
        assert_eq!(TagKey::parse("fire").unwrap().as_str(), "minecraft:fire");
        assert_eq!(TagKey::parse("a/b:c"), Err(ParseIdError::IllegalCharacter("a/b:c".to_string())));
        assert_eq!(TagKey::parse("ssp:Frame"), Err(ParseIdError::IllegalCharacter("ssp:Frame".to_string())));
        assert_eq!(TagKey::parse("ssp:"), Err(ParseIdError::Empty("ssp:".to_string())));
    }

    #[test]
    fn sample_is_member() {

        let key = TagKey::parse("test:frame").unwrap();
        let tag = BlockTag::new(key.clone(), [block::GLOWSTONE, block::GOLD_BLOCK, block::GLOWSTONE]);
        assert_eq!(tag.len(), 2);
        assert!(tag.contains(block::GOLD_BLOCK));
        assert!(!tag.contains(block::OBSIDIAN));

        let mut rand = JavaRandom::new(1);
        for _ in 0..16 {
            let id = tag.sample(&mut rand).unwrap();
            assert!(tag.contains(id));
        }

        let empty = BlockTag::new(key, []);
        assert_eq!(empty.sample(&mut rand), None);

    }

}
