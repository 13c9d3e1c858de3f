//! Read access to what the builders write.

use std::collections::BTreeMap;

use cobalt_text::Text;
use enumset::EnumSet;
use tracing::warn;
use valence_protocol::{ItemStack, nbt::Compound};

use crate::{
    Category, Enchantment, ItemFlag,
    builder::{
        CUSTOM_MODEL_DATA, DAMAGE, HIDE_FLAGS, UNBREAKABLE,
        banner::{BLOCK_ENTITY_TAG, BannerPattern, PATTERNS},
        book::BookMeta,
        enchantment_key,
        firework::FireworkMeta,
        map::MapMeta,
        stored_enchantment,
    },
    flag,
    profile::{GameProfile, SKULL_OWNER},
    tag,
};

mod private {
    pub trait Sealed {}
}

/// The category-specific part of an item, decoded from its tag.
#[derive(Clone, PartialEq, Debug)]
pub enum ItemMeta {
    Generic,
    /// Layers from bottom to top. Layers with unknown codes are skipped.
    Banner(Vec<BannerPattern>),
    Book(BookMeta),
    Firework(FireworkMeta),
    Map(MapMeta),
    Skull(Option<GameProfile>),
}

pub trait ItemExt: private::Sealed {
    fn category(&self) -> Category;

    /// `None` when the item has no custom name.
    fn display_name(&self) -> Option<Text<'static>>;

    fn lore(&self) -> Vec<Text<'static>>;

    fn enchantments(&self) -> BTreeMap<Enchantment, u16>;

    fn item_flags(&self) -> EnumSet<ItemFlag>;

    fn is_unbreakable(&self) -> bool;

    fn damage(&self) -> Option<u16>;

    fn custom_model_data(&self) -> Option<i32>;

    fn skull_profile(&self) -> Option<GameProfile>;

    /// The base64 `textures` value of a player head.
    fn skull_texture(&self) -> Option<String>;

    fn meta(&self) -> ItemMeta;
}

impl private::Sealed for ItemStack {}

impl ItemExt for ItemStack {
    fn category(&self) -> Category {
        Category::of(self.item)
    }

    fn display_name(&self) -> Option<Text<'static>> {
        let display = tag::compound(self.nbt.as_ref()?, tag::DISPLAY)?;
        let raw = tag::string(display, tag::NAME)?;

        Some(Text::from_json(raw).unwrap_or_else(|err| {
            warn!(%err, %raw, "stored name is not JSON text");
            Text::from(raw.to_owned())
        }))
    }

    fn lore(&self) -> Vec<Text<'static>> {
        let Some(display) = self
            .nbt
            .as_ref()
            .and_then(|root| tag::compound(root, tag::DISPLAY))
        else {
            return Vec::new();
        };

        tag::strings(display, tag::LORE)
            .iter()
            .map(|raw| {
                Text::from_json(raw).unwrap_or_else(|err| {
                    warn!(%err, %raw, "stored lore line is not JSON text");
                    Text::from(raw.clone())
                })
            })
            .collect()
    }

    fn enchantments(&self) -> BTreeMap<Enchantment, u16> {
        let Some(root) = &self.nbt else {
            return BTreeMap::new();
        };

        tag::compounds(root, enchantment_key(self.item))
            .iter()
            .filter_map(|entry| {
                let enchantment = stored_enchantment(entry)?;
                let level = u16::try_from(tag::int(entry, "lvl")?).ok()?;
                Some((enchantment, level))
            })
            .collect()
    }

    fn item_flags(&self) -> EnumSet<ItemFlag> {
        self.nbt
            .as_ref()
            .and_then(|root| tag::int(root, HIDE_FLAGS))
            .map_or_else(EnumSet::empty, flag::from_hide_flags)
    }

    fn is_unbreakable(&self) -> bool {
        self.nbt
            .as_ref()
            .is_some_and(|root| tag::flag(root, UNBREAKABLE))
    }

    fn damage(&self) -> Option<u16> {
        let damage = tag::int(self.nbt.as_ref()?, DAMAGE)?;
        u16::try_from(damage).ok()
    }

    fn custom_model_data(&self) -> Option<i32> {
        tag::int(self.nbt.as_ref()?, CUSTOM_MODEL_DATA)
    }

    fn skull_profile(&self) -> Option<GameProfile> {
        let owner = tag::compound(self.nbt.as_ref()?, SKULL_OWNER)?;
        Some(GameProfile::from_nbt(owner))
    }

    fn skull_texture(&self) -> Option<String> {
        self.skull_profile()?.texture().map(str::to_owned)
    }

    fn meta(&self) -> ItemMeta {
        let empty = Compound::new();
        let root = self.nbt.as_ref().unwrap_or(&empty);

        match self.category() {
            Category::Generic => ItemMeta::Generic,
            Category::Banner => ItemMeta::Banner(
                tag::compound(root, BLOCK_ENTITY_TAG)
                    .map(|block_entity| {
                        tag::compounds(block_entity, PATTERNS)
                            .iter()
                            .filter_map(BannerPattern::from_nbt)
                            .collect()
                    })
                    .unwrap_or_default(),
            ),
            Category::Book => ItemMeta::Book(BookMeta::from_nbt(self.item, root)),
            Category::Firework => ItemMeta::Firework(FireworkMeta::from_nbt(self.item, root)),
            Category::Map => ItemMeta::Map(MapMeta::from_nbt(root)),
            Category::Skull => ItemMeta::Skull(self.skull_profile()),
        }
    }
}

#[cfg(test)]
mod tests {
    use valence_protocol::ItemKind;

    use super::*;

    #[test]
    fn test_bare_stack() {
        let stack = ItemStack::new(ItemKind::Stone, 1, None);

        assert_eq!(stack.display_name(), None);
        assert!(stack.lore().is_empty());
        assert!(stack.enchantments().is_empty());
        assert!(stack.item_flags().is_empty());
        assert!(!stack.is_unbreakable());
        assert_eq!(stack.damage(), None);
        assert_eq!(stack.meta(), ItemMeta::Generic);
    }

    #[test]
    fn test_plain_string_name_is_read() {
        let mut display = Compound::new();
        display.insert(tag::NAME, valence_protocol::nbt::Value::String("\"Rock\"".to_owned()));
        let mut root = Compound::new();
        root.insert(tag::DISPLAY, valence_protocol::nbt::Value::Compound(display));

        let stack = ItemStack::new(ItemKind::Stone, 1, Some(root));
        assert_eq!(stack.display_name().map(|name| name.to_plain()).as_deref(), Some("Rock"));
    }

    #[test]
    fn test_skull_without_owner() {
        let head = ItemStack::new(ItemKind::PlayerHead, 1, None);
        assert_eq!(head.meta(), ItemMeta::Skull(None));
        assert_eq!(head.skull_texture(), None);
    }
}
