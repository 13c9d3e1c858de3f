use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::Text;

/// Action to take on click of the text.
///
/// Items only honor these inside written book pages.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum ClickEvent<'a> {
    /// Opens an URL
    OpenUrl(Cow<'a, str>),
    /// Sends a chat command. Doesn't actually have to be a command, can be a
    /// normal chat message.
    RunCommand(Cow<'a, str>),
    /// Replaces the contents of the chat box with the text, not necessarily a
    /// command.
    SuggestCommand(Cow<'a, str>),
    /// Changes the page of the book. Indexing starts at 1.
    ChangePage(#[serde(with = "page_number")] i32),
    /// Copies the given text to clipboard
    CopyToClipboard(Cow<'a, str>),
}

/// Action to take when mouse-hovering on the text.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "action", content = "contents", rename_all = "snake_case")]
pub enum HoverEvent<'a> {
    /// Displays a tooltip with the given text.
    ShowText(Text<'a>),
}

impl ClickEvent<'_> {
    #[must_use]
    pub fn into_owned(self) -> ClickEvent<'static> {
        match self {
            Self::OpenUrl(url) => ClickEvent::OpenUrl(Cow::Owned(url.into_owned())),
            Self::RunCommand(cmd) => ClickEvent::RunCommand(Cow::Owned(cmd.into_owned())),
            Self::SuggestCommand(cmd) => ClickEvent::SuggestCommand(Cow::Owned(cmd.into_owned())),
            Self::ChangePage(page) => ClickEvent::ChangePage(page),
            Self::CopyToClipboard(s) => ClickEvent::CopyToClipboard(Cow::Owned(s.into_owned())),
        }
    }
}

impl HoverEvent<'_> {
    #[must_use]
    pub fn into_owned(self) -> HoverEvent<'static> {
        match self {
            Self::ShowText(text) => HoverEvent::ShowText(text.into_owned()),
        }
    }
}

/// Vanilla writes the page number as a string and accepts either form.
mod page_number {
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(page: &i32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(page)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Page {
            Number(i32),
            Text(String),
        }

        match Page::deserialize(deserializer)? {
            Page::Number(page) => Ok(page),
            Page::Text(page) => page.parse().map_err(de::Error::custom),
        }
    }
}
