use std::fmt::Debug;

use cobalt_text::{Text, legacy};

/// Turns caller-supplied strings into the components stored on the item.
///
/// Every builder routes names, lore lines and written-book pages through one
/// of these, so swapping the text backend never touches builder logic.
/// Implementations are expected to be stateless and shared by reference.
pub trait NameLoreStrategy: Debug + Send + Sync {
    fn name(&self, raw: &str) -> Text<'static>;

    fn lore_line(&self, raw: &str) -> Text<'static>;

    /// Pages of a written book. Defaults to the lore formatting.
    fn page(&self, raw: &str) -> Text<'static> {
        self.lore_line(raw)
    }
}

/// Understands legacy formatting codes introduced by `marker`.
///
/// Names and lore are forced non-italic at the root, the way the client shows
/// items renamed by plugins.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LegacyNameLore {
    marker: char,
}

/// `§` codes.
pub static LEGACY: LegacyNameLore = LegacyNameLore::section();

/// `&` codes, as typically written in config files.
pub static LEGACY_AMPERSAND: LegacyNameLore = LegacyNameLore::ampersand();

impl LegacyNameLore {
    #[must_use]
    pub const fn section() -> Self {
        Self {
            marker: legacy::SECTION,
        }
    }

    #[must_use]
    pub const fn ampersand() -> Self {
        Self {
            marker: legacy::AMPERSAND,
        }
    }

    #[must_use]
    pub const fn marker(&self) -> char {
        self.marker
    }
}

impl Default for LegacyNameLore {
    fn default() -> Self {
        Self::section()
    }
}

impl NameLoreStrategy for LegacyNameLore {
    fn name(&self, raw: &str) -> Text<'static> {
        upright(legacy::parse(raw, self.marker))
    }

    fn lore_line(&self, raw: &str) -> Text<'static> {
        upright(legacy::parse(raw, self.marker))
    }

    fn page(&self, raw: &str) -> Text<'static> {
        legacy::parse(raw, self.marker)
    }
}

/// Turns off the client's default italics unless the text asked for them.
fn upright(text: Text<'static>) -> Text<'static> {
    match text.italic {
        Some(_) => text,
        None => text.italic(false),
    }
}

/// Stores strings verbatim, with no formatting codes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PlainNameLore;

pub static PLAIN: PlainNameLore = PlainNameLore;

impl NameLoreStrategy for PlainNameLore {
    fn name(&self, raw: &str) -> Text<'static> {
        Text::owned(raw)
    }

    fn lore_line(&self, raw: &str) -> Text<'static> {
        Text::owned(raw)
    }
}

#[cfg(test)]
mod tests {
    use cobalt_text::{Color, NamedColor};

    use super::*;

    #[test]
    fn test_legacy_names_are_not_italic() {
        let name = LEGACY.name("§6Gold");
        assert_eq!(name.italic, Some(false));
        assert_eq!(name.color, Some(Color::Named(NamedColor::Gold)));
        assert_eq!(name.to_plain(), "Gold");
    }

    #[test]
    fn test_leading_italic_code_is_kept() {
        let name = LEGACY.name("§oFancy");
        assert_eq!(name.italic, Some(true));
        assert_eq!(name.to_plain(), "Fancy");

        let line = LEGACY_AMPERSAND.lore_line("&7&oWhisper");
        assert_eq!(line.italic, Some(true));
    }

    #[test]
    fn test_italic_after_text_is_kept() {
        let name = LEGACY.name("a§oFancy");
        assert_eq!(name.italic, Some(false));
        assert_eq!(name.extra[1].italic, Some(true));
    }

    #[test]
    fn test_pages_keep_default_style() {
        let page = LEGACY.page("Once upon a time");
        assert_eq!(page.italic, None);
    }

    #[test]
    fn test_ampersand_marker() {
        let line = LEGACY_AMPERSAND.lore_line("&cHot");
        assert_eq!(line.color, Some(Color::Named(NamedColor::Red)));

        // the section strategy leaves & codes alone
        assert_eq!(LEGACY.lore_line("&cHot").to_plain(), "&cHot");
    }

    #[test]
    fn test_plain_keeps_codes() {
        assert_eq!(PLAIN.name("§6Gold").to_plain(), "§6Gold");
    }
}
