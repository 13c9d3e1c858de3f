use std::fmt;

use valence_protocol::ItemKind;

/// Which family of item-specific metadata a kind carries.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Category {
    Generic,
    Banner,
    Book,
    Firework,
    Map,
    Skull,
}

impl Category {
    #[must_use]
    pub const fn of(kind: ItemKind) -> Self {
        match kind {
            ItemKind::WhiteBanner
            | ItemKind::OrangeBanner
            | ItemKind::MagentaBanner
            | ItemKind::LightBlueBanner
            | ItemKind::YellowBanner
            | ItemKind::LimeBanner
            | ItemKind::PinkBanner
            | ItemKind::GrayBanner
            | ItemKind::LightGrayBanner
            | ItemKind::CyanBanner
            | ItemKind::PurpleBanner
            | ItemKind::BlueBanner
            | ItemKind::BrownBanner
            | ItemKind::GreenBanner
            | ItemKind::RedBanner
            | ItemKind::BlackBanner => Self::Banner,
            ItemKind::WritableBook | ItemKind::WrittenBook => Self::Book,
            ItemKind::FireworkRocket | ItemKind::FireworkStar => Self::Firework,
            ItemKind::Map | ItemKind::FilledMap => Self::Map,
            ItemKind::PlayerHead => Self::Skull,
            _ => Self::Generic,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Banner => "banner",
            Self::Book => "book",
            Self::Firework => "firework",
            Self::Map => "map",
            Self::Skull => "skull",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

mod private {
    pub trait Sealed {}
}

/// Type-level category used to parameterize [`crate::ItemBuilder`].
pub trait CategoryTag: private::Sealed + Copy + fmt::Debug {
    const CATEGORY: Category;

    #[must_use]
    fn accepts(kind: ItemKind) -> bool {
        Category::of(kind) == Self::CATEGORY
    }
}

macro_rules! category_tags {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Copy, Clone, Debug, Default)]
            pub struct $name;

            impl private::Sealed for $name {}
        )*
    };
}

category_tags! {
    /// Any item; no category-specific operations.
    Generic,
    /// `*_banner`
    Banner,
    /// `writable_book` and `written_book`
    Book,
    /// `firework_rocket` and `firework_star`
    Firework,
    /// `map` and `filled_map`
    Map,
    /// `player_head`
    Skull,
}

impl CategoryTag for Generic {
    const CATEGORY: Category = Category::Generic;

    fn accepts(_kind: ItemKind) -> bool {
        true
    }
}

impl CategoryTag for Banner {
    const CATEGORY: Category = Category::Banner;
}

impl CategoryTag for Book {
    const CATEGORY: Category = Category::Book;
}

impl CategoryTag for Firework {
    const CATEGORY: Category = Category::Firework;
}

impl CategoryTag for Map {
    const CATEGORY: Category = Category::Map;
}

impl CategoryTag for Skull {
    const CATEGORY: Category = Category::Skull;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(Category::of(ItemKind::Stone), Category::Generic);
        assert_eq!(Category::of(ItemKind::RedBanner), Category::Banner);
        assert_eq!(Category::of(ItemKind::WrittenBook), Category::Book);
        assert_eq!(Category::of(ItemKind::FireworkStar), Category::Firework);
        assert_eq!(Category::of(ItemKind::FilledMap), Category::Map);
        assert_eq!(Category::of(ItemKind::PlayerHead), Category::Skull);

        // other heads have no profile
        assert_eq!(Category::of(ItemKind::ZombieHead), Category::Generic);
    }

    #[test]
    fn test_generic_accepts_everything() {
        assert!(ItemKind::ALL.iter().all(|&kind| Generic::accepts(kind)));
        assert!(Skull::accepts(ItemKind::PlayerHead));
        assert!(!Skull::accepts(ItemKind::Stone));
        assert!(!Banner::accepts(ItemKind::Shield));
    }
}
