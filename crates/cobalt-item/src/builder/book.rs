use cobalt_text::Text;
use serde::{Deserialize, Serialize};
use snafu::ensure;
use tracing::{trace, warn};
use valence_protocol::{
    ItemKind,
    nbt::{Compound, Value},
};

use crate::{
    Book,
    builder::ItemBuilder,
    error::{IndexOutOfBoundsSnafu, Result, TitleTooLongSnafu, TooManyPagesSnafu},
    tag,
};

const AUTHOR: &str = "author";
const TITLE: &str = "title";
const GENERATION: &str = "generation";
const PAGES: &str = "pages";
const RESOLVED: &str = "resolved";

pub const MAX_TITLE_LEN: usize = 32;
pub const MAX_PAGES: usize = 100;

/// How many times a written book has been copied.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Generation {
    #[default]
    Original,
    CopyOfOriginal,
    CopyOfCopy,
    Tattered,
}

impl Generation {
    pub const ALL: [Self; 4] = [
        Self::Original,
        Self::CopyOfOriginal,
        Self::CopyOfCopy,
        Self::Tattered,
    ];

    #[must_use]
    pub fn from_id(id: i32) -> Option<Self> {
        usize::try_from(id).ok().and_then(|id| Self::ALL.get(id).copied())
    }

    #[must_use]
    pub const fn id(self) -> i32 {
        self as i32
    }
}

/// What a book stack carries besides its kind.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct BookMeta {
    pub author: Option<String>,
    pub title: Option<String>,
    pub generation: Option<Generation>,
    /// Written book pages are parsed from JSON; writable book pages are plain.
    pub pages: Vec<Text<'static>>,
}

impl BookMeta {
    #[must_use]
    pub fn from_nbt(kind: ItemKind, root: &Compound) -> Self {
        let pages = tag::strings(root, PAGES)
            .iter()
            .map(|raw| match kind {
                ItemKind::WrittenBook => Text::from_json(raw).unwrap_or_else(|err| {
                    warn!(%err, %raw, "stored page is not JSON text");
                    Text::from(raw.clone())
                }),
                _ => Text::from(raw.clone()),
            })
            .collect();

        Self {
            author: tag::string(root, AUTHOR).map(str::to_owned),
            title: tag::string(root, TITLE).map(str::to_owned),
            generation: tag::int(root, GENERATION).and_then(Generation::from_id),
            pages,
        }
    }
}

impl ItemBuilder<'_, Book> {
    pub fn author(self, author: impl Into<String>) -> Self {
        let author = author.into();
        self.edit(|root| {
            root.insert(AUTHOR, Value::String(author));
        })
    }

    pub fn title(self, title: impl Into<String>) -> Result<Self> {
        let title = title.into();
        let len = title.chars().count();
        ensure!(len <= MAX_TITLE_LEN, TitleTooLongSnafu {
            len,
            max: MAX_TITLE_LEN
        });

        Ok(self.edit(|root| {
            root.insert(TITLE, Value::String(title));
        }))
    }

    pub fn generation(self, generation: Generation) -> Self {
        self.edit(|root| {
            root.insert(GENERATION, Value::Int(generation.id()));
        })
    }

    /// Appends a page.
    pub fn page(self, page: impl AsRef<str>) -> Result<Self> {
        self.pages([page])
    }

    /// Appends pages in order. Fails without writing anything if the book
    /// would end up with more than [`MAX_PAGES`].
    pub fn pages<I>(self, pages: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let pages: Vec<_> = pages
            .into_iter()
            .map(|page| self.encode_page(page.as_ref()))
            .collect();

        ensure!(self.page_count() + pages.len() <= MAX_PAGES, TooManyPagesSnafu {
            max: MAX_PAGES
        });

        trace!(added = pages.len(), "appending book pages");
        Ok(self.edit_pages(|stored| stored.extend(pages)))
    }

    /// Replaces the page at `index`.
    pub fn set_page(self, index: usize, page: impl AsRef<str>) -> Result<Self> {
        let len = self.page_count();
        ensure!(index < len, IndexOutOfBoundsSnafu {
            what: "page",
            index,
            len
        });

        let page = self.encode_page(page.as_ref());
        Ok(self.edit_pages(|stored| stored[index] = page))
    }

    fn encode_page(&self, raw: &str) -> String {
        match self.stack.item {
            ItemKind::WrittenBook => self.strategy.page(raw).to_json(),
            _ => raw.to_owned(),
        }
    }

    fn page_count(&self) -> usize {
        self.stack
            .nbt
            .as_ref()
            .map_or(0, |root| tag::strings(root, PAGES).len())
    }

    fn edit_pages(self, f: impl FnOnce(&mut Vec<String>)) -> Self {
        let written = self.stack.item == ItemKind::WrittenBook;
        self.edit(|root| {
            let mut pages = tag::take_strings(root, PAGES);
            f(&mut pages);
            tag::put_strings(root, PAGES, pages);

            if written {
                tag::put_flag(root, RESOLVED, true);
            }
        })
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "these are tests")]
mod tests {
    use super::*;
    use crate::{ItemExt, ItemMeta};

    fn meta(stack: &valence_protocol::ItemStack) -> BookMeta {
        match stack.meta() {
            ItemMeta::Book(meta) => meta,
            other => panic!("expected book meta, got {other:?}"),
        }
    }

    #[test]
    fn test_written_book() {
        let book = ItemBuilder::written_book()
            .author("Steve")
            .title("Diary")
            .unwrap()
            .generation(Generation::CopyOfOriginal)
            .pages(["§lDay one", "Day two"])
            .unwrap()
            .build();

        let root = book.nbt.as_ref().unwrap();
        assert!(tag::flag(root, RESOLVED));

        let meta = meta(&book);
        assert_eq!(meta.author.as_deref(), Some("Steve"));
        assert_eq!(meta.title.as_deref(), Some("Diary"));
        assert_eq!(meta.generation, Some(Generation::CopyOfOriginal));

        let pages: Vec<_> = meta.pages.iter().map(Text::to_plain).collect();
        assert_eq!(pages, ["Day one", "Day two"]);
        assert_eq!(meta.pages[0].bold, Some(true));
    }

    #[test]
    fn test_writable_book_keeps_raw_pages() {
        let book = ItemBuilder::writable_book()
            .page("§lnot parsed")
            .unwrap()
            .build();

        let root = book.nbt.as_ref().unwrap();
        assert_eq!(tag::strings(root, PAGES), ["§lnot parsed"]);
        assert!(!tag::flag(root, RESOLVED));
    }

    #[test]
    fn test_title_limit_counts_chars() {
        let ok = "é".repeat(MAX_TITLE_LEN);
        assert!(ItemBuilder::written_book().title(ok).is_ok());

        let err = ItemBuilder::written_book()
            .title("x".repeat(MAX_TITLE_LEN + 1))
            .unwrap_err();
        assert!(matches!(err, crate::Error::TitleTooLong { len: 33, max: 32 }));
    }

    #[test]
    fn test_page_limit() {
        let full = ItemBuilder::writable_book()
            .pages((0..MAX_PAGES).map(|i| i.to_string()))
            .unwrap();

        let err = full.page("one too many").unwrap_err();
        assert!(matches!(err, crate::Error::TooManyPages { max: MAX_PAGES }));
    }

    #[test]
    fn test_set_page() {
        let book = ItemBuilder::writable_book()
            .pages(["a", "b"])
            .unwrap()
            .set_page(1, "c")
            .unwrap()
            .build();

        let pages: Vec<_> = meta(&book).pages.iter().map(Text::to_plain).collect();
        assert_eq!(pages, ["a", "c"]);

        let err = ItemBuilder::writable_book().set_page(0, "x").unwrap_err();
        assert!(matches!(err, crate::Error::IndexOutOfBounds { .. }));
    }
}
