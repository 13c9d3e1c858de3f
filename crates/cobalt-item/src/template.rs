//! Items described in configuration.
//!
//! ```toml
//! [rock]
//! kind = "minecraft:stone"
//! amount = 4
//! name = "&7Rock"
//! lore = ["&8Heavy"]
//!
//! [rock.enchantments]
//! unbreaking = 2
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use snafu::{OptionExt, ResultExt};
use tracing::debug;
use valence_protocol::{ItemKind, ItemStack};

use crate::{
    Banner, Book, Enchantment, Firework, ItemFlag, Map, Rgb, Skull,
    builder::{
        ItemBuilder, banner::BannerPattern, book::Generation, firework::FireworkEffect,
        skull::PlayerRef,
    },
    error::{Result, TemplateSnafu, UnknownItemSnafu},
    profile::GameProfile,
    strategy::{LEGACY_AMPERSAND, NameLoreStrategy},
};

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BookTemplate {
    pub author: Option<String>,
    pub title: Option<String>,
    pub generation: Option<Generation>,
    pub pages: Vec<String>,
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FireworkTemplate {
    pub power: Option<u8>,
    pub effects: Vec<FireworkEffect>,
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapTemplate {
    pub id: Option<i32>,
    pub color: Option<Rgb>,
    pub location_name: Option<String>,
    pub scaling: Option<bool>,
}

/// One item, as written in a config file.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemTemplate {
    /// Item id, with or without the `minecraft:` namespace.
    pub kind: String,
    #[serde(default)]
    pub amount: Option<i8>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub lore: Vec<String>,
    #[serde(default)]
    pub enchantments: BTreeMap<Enchantment, u16>,
    #[serde(default)]
    pub flags: Vec<ItemFlag>,
    #[serde(default)]
    pub unbreakable: bool,
    #[serde(default)]
    pub glow: bool,
    #[serde(default)]
    pub model: Option<i32>,
    #[serde(default)]
    pub damage: Option<u16>,
    #[serde(default)]
    pub color: Option<Rgb>,
    #[serde(default)]
    pub texture: Option<String>,
    #[serde(default)]
    pub owner: Option<PlayerRef>,
    #[serde(default)]
    pub patterns: Vec<BannerPattern>,
    #[serde(default)]
    pub book: Option<BookTemplate>,
    #[serde(default)]
    pub firework: Option<FireworkTemplate>,
    #[serde(default)]
    pub map: Option<MapTemplate>,
}

impl ItemTemplate {
    pub fn from_toml(source: &str) -> Result<Self> {
        toml::from_str(source).context(TemplateSnafu)
    }

    pub fn item_kind(&self) -> Result<ItemKind> {
        parse_kind(&self.kind)
    }

    /// Builds the item with `&` formatting codes, the usual config convention.
    pub fn build(&self) -> Result<ItemStack> {
        self.build_with(&LEGACY_AMPERSAND)
    }

    pub fn build_with(&self, strategy: &dyn NameLoreStrategy) -> Result<ItemStack> {
        let kind = self.item_kind()?;
        let mut builder = ItemBuilder::from_kind(kind).using(strategy);

        if let Some(amount) = self.amount {
            builder = builder.amount(amount)?;
        }
        if let Some(name) = &self.name {
            builder = builder.name(name);
        }
        if !self.lore.is_empty() {
            builder = builder.lore(&self.lore);
        }

        builder = builder.enchants(self.enchantments.iter().map(|(&e, &level)| (e, level)))?;

        if !self.flags.is_empty() {
            builder = builder.flags(self.flags.iter().copied());
        }
        if self.unbreakable {
            builder = builder.unbreakable(true);
        }
        if self.glow {
            builder = builder.glow(true);
        }
        if let Some(model) = self.model {
            builder = builder.model(model);
        }
        if let Some(damage) = self.damage {
            builder = builder.durability(damage)?;
        }
        if let Some(color) = self.color {
            builder = builder.color(color)?;
        }

        if !self.patterns.is_empty() {
            builder = builder
                .specialize::<Banner>()?
                .patterns(self.patterns.iter().copied())
                .generalize();
        }

        if let Some(book) = &self.book {
            let mut books = builder.specialize::<Book>()?;
            if let Some(author) = &book.author {
                books = books.author(author);
            }
            if let Some(title) = &book.title {
                // titles are plain strings, so formatting codes are dropped
                books = books.title(strategy.name(title).to_plain())?;
            }
            if let Some(generation) = book.generation {
                books = books.generation(generation);
            }
            builder = books.pages(&book.pages)?.generalize();
        }

        if let Some(firework) = &self.firework {
            let mut fireworks = builder.specialize::<Firework>()?;
            if let Some(power) = firework.power {
                fireworks = fireworks.power(power)?;
            }
            builder = fireworks.effects(firework.effects.iter().cloned())?.generalize();
        }

        if let Some(map) = &self.map {
            let mut maps = builder.specialize::<Map>()?;
            if let Some(id) = map.id {
                maps = maps.id(id);
            }
            if let Some(color) = map.color {
                maps = maps.color(color);
            }
            if let Some(name) = &map.location_name {
                maps = maps.location_name(name);
            }
            if let Some(scaling) = map.scaling {
                maps = maps.scaling(scaling);
            }
            builder = maps.generalize();
        }

        builder = match (&self.owner, &self.texture) {
            (None, None) => builder,
            (Some(owner), None) => builder.specialize::<Skull>()?.owner(owner.clone()).generalize(),
            (owner, Some(texture)) => {
                let profile = match owner {
                    Some(owner) => GameProfile::new(owner.uuid, Some(owner.name.clone()))
                        .with_texture(texture),
                    None => GameProfile::textured(texture),
                };
                builder.specialize::<Skull>()?.profile(profile)?.generalize()
            }
        };

        debug!(kind = %self.kind, "item template built");
        Ok(builder.build())
    }
}

/// A table of named templates.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemTemplates {
    templates: BTreeMap<String, ItemTemplate>,
}

impl ItemTemplates {
    pub fn from_toml(source: &str) -> Result<Self> {
        let templates: Self = toml::from_str(source).context(TemplateSnafu)?;
        debug!(count = templates.len(), "loaded item templates");
        Ok(templates)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ItemTemplate> {
        self.templates.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ItemTemplate)> {
        self.templates
            .iter()
            .map(|(name, template)| (name.as_str(), template))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn insert(&mut self, name: impl Into<String>, template: ItemTemplate) {
        self.templates.insert(name.into(), template);
    }
}

/// Resolves an item id such as `stone` or `minecraft:stone`.
pub fn parse_kind(ident: &str) -> Result<ItemKind> {
    let name = ident.strip_prefix("minecraft:").unwrap_or(ident);
    ItemKind::from_str(name).context(UnknownItemSnafu { ident })
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "these are tests")]
mod tests {
    use super::*;
    use crate::{ItemExt, ItemMeta, strategy::PLAIN};

    #[test]
    fn test_parse_kind() {
        assert_eq!(parse_kind("stone").unwrap(), ItemKind::Stone);
        assert_eq!(parse_kind("minecraft:player_head").unwrap(), ItemKind::PlayerHead);
        assert!(matches!(
            parse_kind("minecraft:not_an_item"),
            Err(crate::Error::UnknownItem { .. })
        ));
    }

    #[test]
    fn test_minimal_template() {
        let template = ItemTemplate::from_toml(r#"kind = "stick""#).unwrap();
        let stick = template.build().unwrap();

        assert_eq!(stick.item, ItemKind::Stick);
        assert_eq!(stick.count, 1);
        assert_eq!(stick.nbt, None);
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let err = ItemTemplate::from_toml("kind = \"stick\"\nnmae = \"typo\"").unwrap_err();
        assert!(matches!(err, crate::Error::Template { .. }));
    }

    #[test]
    fn test_ampersand_codes_by_default() {
        let template = ItemTemplate::from_toml("kind = \"stone\"\nname = \"&cHot\"").unwrap();
        let stone = template.build().unwrap();

        assert_eq!(stone.display_name().unwrap().to_plain(), "Hot");
    }

    #[test]
    fn test_book_title_drops_codes() {
        let template = ItemTemplate::from_toml(
            "kind = \"written_book\"\n[book]\ntitle = \"&6&lTreasure\"\npages = [\"x\"]",
        )
        .unwrap();

        let ItemMeta::Book(book) = template.build().unwrap().meta() else {
            panic!("expected a book");
        };
        assert_eq!(book.title.as_deref(), Some("Treasure"));

        let ItemMeta::Book(book) = template.build_with(&PLAIN).unwrap().meta() else {
            panic!("expected a book");
        };
        assert_eq!(book.title.as_deref(), Some("&6&lTreasure"));
    }
}
