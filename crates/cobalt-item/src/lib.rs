//! Fluent construction of decorated item stacks.
//!
//! ```
//! use cobalt_item::{ItemBuilder, ItemExt};
//! use valence_protocol::ItemKind;
//!
//! let rock = ItemBuilder::from_kind(ItemKind::Stone)
//!     .name("Rock")
//!     .amount(4)?
//!     .build();
//!
//! assert_eq!(rock.count, 4);
//! assert_eq!(rock.display_name().map(|name| name.to_plain()).as_deref(), Some("Rock"));
//! # Ok::<(), cobalt_item::Error>(())
//! ```

pub use builder::{
    BannerBuilder, BookBuilder, FireworkBuilder, ItemBuilder, MapBuilder, SkullBuilder,
    banner::{BannerPattern, PatternType},
    book::{BookMeta, Generation},
    firework::{FireworkEffect, FireworkMeta, FireworkShape},
    map::MapMeta,
    skull::PlayerRef,
};
pub use category::{Banner, Book, Category, CategoryTag, Firework, Generic, Map, Skull};
pub use color::{DyeColor, InvalidRgb, Rgb};
pub use enchantment::Enchantment;
pub use error::{Error, Result};
pub use ext::{ItemExt, ItemMeta};
pub use flag::ItemFlag;
pub use profile::{GameProfile, ProfileError, ProfileInstaller, Property, SkullOwnerInstaller};
pub use strategy::{LegacyNameLore, NameLoreStrategy, PlainNameLore};
pub use template::{ItemTemplate, ItemTemplates};

pub mod builder;
mod category;
mod color;
mod enchantment;
mod error;
mod ext;
pub mod flag;
pub mod profile;
pub mod strategy;
mod tag;
pub mod template;

pub use cobalt_text as text;
