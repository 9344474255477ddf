//! Block enumeration and the material queries needed by portal frames.


/// Internal macro to easily define blocks registry.
macro_rules! blocks {
    (
        $($ident:ident / $id:literal : $name:literal),* $(,)?
    ) => {

        static NAMES: [&'static str; 256] = {
            let mut arr = [""; 256];
            $(arr[$id as usize] = $name;)*
            arr
        };

        $(pub const $ident: u8 = $id;)*

    };
}

blocks! {
    AIR/0:              "air",
    STONE/1:            "stone",
    GRASS/2:            "grass",
    DIRT/3:             "dirt",
    COBBLESTONE/4:      "cobblestone",
    WOOD/5:             "wood",
    BEDROCK/7:          "bedrock",
    WATER_STILL/9:      "water_still",
    LAVA_STILL/11:      "lava_still",
    SAND/12:            "sand",
    GRAVEL/13:          "gravel",
    LOG/17:             "log",
    GLASS/20:           "glass",
    LAPIS_BLOCK/22:     "lapis_block",
    SANDSTONE/24:       "sandstone",
    GOLD_BLOCK/41:      "gold_block",
    IRON_BLOCK/42:      "iron_block",
    BRICK/45:           "brick",
    MOSSY_COBBLESTONE/48: "mossy_cobblestone",
    OBSIDIAN/49:        "obsidian",
    TORCH/50:           "torch",
    FIRE/51:            "fire",
    DIAMOND_BLOCK/57:   "diamond_block",
    SNOW_BLOCK/80:      "snow_block",
    NETHERRACK/87:      "netherrack",
    SOULSAND/88:        "soulsand",
    GLOWSTONE/89:       "glowstone",
    PORTAL/90:          "portal",
    SOUL_FIRE/97:       "soul_fire",
    CRYING_OBSIDIAN/98: "crying_obsidian",
    END_STONE/99:       "end_stone",
    QUARTZ_BLOCK/100:   "quartz_block",
    EMERALD_BLOCK/101:  "emerald_block",
    AMETHYST_BLOCK/102: "amethyst_block",
    PRISMARINE/103:     "prismarine",
}

/// Find a block name from its id.
#[inline]
pub const fn name(id: u8) -> &'static str {
    NAMES[id as usize]
}

/// Find a block id from its name.
pub fn from_name(name: &str) -> Option<u8> {
    NAMES.iter()
        .position(|&n| !n.is_empty() && n == name)
        .map(|n| n as u8)
}

/// Return true if the block doesn't obstruct a portal's interior, this is the case for
/// air, fires and portal blocks themselves.
#[inline]
pub fn is_empty(id: u8) -> bool {
    matches!(id, AIR | FIRE | SOUL_FIRE | PORTAL)
}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn names() {
        assert_eq!(name(OBSIDIAN), "obsidian");
        assert_eq!(from_name("glowstone"), Some(GLOWSTONE));
        assert_eq!(from_name("crying_obsidian"), Some(CRYING_OBSIDIAN));
        assert_eq!(from_name("unobtainium"), None);
        assert_eq!(from_name(""), None);
    }

    #[test]
    fn empty_blocks() {
        assert!(is_empty(AIR));
        assert!(is_empty(FIRE));
        assert!(is_empty(SOUL_FIRE));
        assert!(is_empty(PORTAL));
        assert!(!is_empty(OBSIDIAN));
        assert!(!is_empty(TORCH));
        assert!(!is_empty(WATER_STILL));
    }

}
