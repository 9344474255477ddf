//! Item enumeration and item stacks.

use crate::block;


/// Internal macro to easily define items registry, item ids start at 256 because lower
/// ids are reserved to block items.
macro_rules! items {
    (
        $($ident:ident / $id:literal : $name:literal),* $(,)?
    ) => {

        static NAMES: [&'static str; 256] = {
            let mut arr = [""; 256];
            $(arr[$id as usize] = $name;)*
            arr
        };

        $(pub const $ident: u16 = $id + 256;)*

    };
}

items! {
    FLINT_AND_STEEL/3:  "flint_and_steel",
    DIAMOND/8:          "diamond",
    IRON_INGOT/9:       "iron_ingot",
    GOLD_INGOT/10:      "gold_ingot",
    STICK/24:           "stick",
    BUCKET/69:          "bucket",
    WATER_BUCKET/70:    "water_bucket",
    LAVA_BUCKET/71:     "lava_bucket",
    GLOWSTONE_DUST/92:  "glowstone_dust",
    BLAZE_ROD/113:      "blaze_rod",
    ENDER_EYE/125:      "ender_eye",
    FIRE_CHARGE/129:    "fire_charge",
    EMERALD/132:        "emerald",
    AMETHYST_SHARD/150: "amethyst_shard",
}

/// Find an item name from its id, block items are named after their block.
pub fn name(id: u16) -> &'static str {
    match id {
        0..=255 => block::name(id as u8),
        256..=511 => NAMES[(id - 256) as usize],
        _ => "",
    }
}

/// Find an item id from its name, item names take precedence over block names.
pub fn from_name(name: &str) -> Option<u16> {
    NAMES.iter()
        .position(|&n| !n.is_empty() && n == name)
        .map(|n| n as u16 + 256)
        .or_else(|| block::from_name(name).map(u16::from))
}


/// An item stack defines the actual number of items and their damage value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemStack {
    /// The item id.
    pub id: u16,
    /// The stack size.
    pub size: u16,
    /// The damage value of the stack.
    pub damage: u16,
}

impl ItemStack {

    pub const EMPTY: Self = Self { id: block::AIR as u16, size: 0, damage: 0 };

    /// Create a stack of a single item.
    pub const fn new(id: u16) -> Self {
        Self { id, size: 1, damage: 0 }
    }

    pub fn with_size(mut self, size: u16) -> ItemStack {
        self.size = size;
        self
    }

    /// Return true if this item stack is air, which is a special case where the item
    /// stack represent an empty slot.
    pub fn is_empty(self) -> bool {
        self.id == block::AIR as u16 || self.size == 0
    }

}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn names() {
        assert_eq!(name(FLINT_AND_STEEL), "flint_and_steel");
        assert_eq!(name(block::OBSIDIAN as u16), "obsidian");
        assert_eq!(from_name("gold_ingot"), Some(GOLD_INGOT));
        assert_eq!(from_name("glowstone"), Some(block::GLOWSTONE as u16));
        assert_eq!(from_name("nothing"), None);
    }

    #[test]
    fn empty_stacks() {
        assert!(ItemStack::EMPTY.is_empty());
        assert!(ItemStack::new(FLINT_AND_STEEL).with_size(0).is_empty());
        assert!(!ItemStack::new(FLINT_AND_STEEL).is_empty());
    }

}
