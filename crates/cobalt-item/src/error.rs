use snafu::Snafu;
use valence_protocol::{ItemKind, ItemStack};

use crate::{Category, Enchantment, profile::ProfileError};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// The stack handed to a category builder is of another category. The
    /// stack is returned untouched.
    #[snafu(display("expected a {expected} item but found {:?}", item.item))]
    TypeMismatch {
        expected: Category,
        item: Box<ItemStack>,
    },

    #[snafu(display("{kind:?} does not support {operation}"))]
    Unsupported {
        operation: &'static str,
        kind: ItemKind,
    },

    #[snafu(display("amount {count} is outside 1..={max} for {kind:?}"))]
    InvalidAmount { kind: ItemKind, count: i8, max: i8 },

    #[snafu(display("{enchantment:?} level {level} is outside 1..={max}"))]
    InvalidLevel {
        enchantment: Enchantment,
        level: u16,
        max: u16,
    },

    #[snafu(display("damage {damage} exceeds the {max} durability of {kind:?}"))]
    InvalidDurability { kind: ItemKind, damage: u16, max: u16 },

    #[snafu(display("book title is {len} characters, at most {max} are allowed"))]
    TitleTooLong { len: usize, max: usize },

    #[snafu(display("books hold at most {max} pages"))]
    TooManyPages { max: usize },

    #[snafu(display("{what} index {index} is out of bounds for length {len}"))]
    IndexOutOfBounds {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[snafu(display("firework effects need at least one color"))]
    EmptyEffect,

    #[snafu(display("firework power {power} is above 127"))]
    InvalidPower { power: u8 },

    /// Installing a skull profile failed; nothing was written.
    #[snafu(display("failed to install skull profile"))]
    SetupFailure { source: ProfileError },

    #[snafu(display("unknown item {ident:?}"))]
    UnknownItem { ident: String },

    #[snafu(display("invalid item template"))]
    Template {
        #[snafu(source(from(toml::de::Error, Box::new)))]
        source: Box<toml::de::Error>,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Gives back the stack a failed category conversion was handed.
    #[must_use]
    pub fn into_item(self) -> Option<ItemStack> {
        match self {
            Self::TypeMismatch { item, .. } => Some(*item),
            _ => None,
        }
    }
}
