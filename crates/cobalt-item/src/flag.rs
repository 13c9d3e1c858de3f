use enumset::{EnumSet, EnumSetType};
use serde::{Deserialize, Serialize};

/// Tooltip sections hidden through the `HideFlags` bitmask.
///
/// Declaration order is the vanilla bit order.
#[derive(EnumSetType, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemFlag {
    HideEnchantments,
    HideAttributes,
    HideUnbreakable,
    HideDestroys,
    HidePlacedOn,
    HidePotionEffects,
    HideDye,
    HideArmorTrim,
}

/// Packs the set into the `HideFlags` int.
#[must_use]
pub fn to_hide_flags(flags: EnumSet<ItemFlag>) -> i32 {
    flags.iter().fold(0, |bits, flag| bits | (1 << flag as u32))
}

/// Unknown bits are ignored.
#[must_use]
pub fn from_hide_flags(bits: i32) -> EnumSet<ItemFlag> {
    EnumSet::all()
        .iter()
        .filter(|&flag| bits & (1 << flag as u32) != 0)
        .collect()
}
