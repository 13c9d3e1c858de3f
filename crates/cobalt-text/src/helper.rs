use std::borrow::Cow;

use crate::{ClickEvent, Color, HoverEvent, Text, TextContent};

impl<'a> Text<'a> {
    /// Creates a new `Text` instance from a string slice.
    #[must_use]
    pub const fn new(s: &'a str) -> Self {
        Self::from_content(TextContent::Text {
            text: Cow::Borrowed(s),
        })
    }

    #[must_use]
    pub const fn from_content(content: TextContent<'a>) -> Self {
        Text {
            content,
            color: None,
            font: None,
            bold: None,
            italic: None,
            underlined: None,
            strikethrough: None,
            obfuscated: None,
            insertion: None,
            click_event: None,
            hover_event: None,
            extra: Vec::new(),
        }
    }

    /// A translated component, rendered in the client's language.
    #[must_use]
    pub const fn translate(key: &'a str) -> Self {
        Self::from_content(TextContent::Translate {
            translate: Cow::Borrowed(key),
            with: Vec::new(),
        })
    }

    #[must_use]
    pub const fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub const fn bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    #[must_use]
    pub const fn italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    #[must_use]
    pub const fn underlined(mut self, underlined: bool) -> Self {
        self.underlined = Some(underlined);
        self
    }

    #[must_use]
    pub const fn strikethrough(mut self, strikethrough: bool) -> Self {
        self.strikethrough = Some(strikethrough);
        self
    }

    #[must_use]
    pub const fn obfuscated(mut self, obfuscated: bool) -> Self {
        self.obfuscated = Some(obfuscated);
        self
    }

    #[must_use]
    pub fn on_click(mut self, event: ClickEvent<'a>) -> Self {
        self.click_event = Some(Box::new(event));
        self
    }

    #[must_use]
    pub fn on_hover(mut self, event: HoverEvent<'a>) -> Self {
        self.hover_event = Some(Box::new(event));
        self
    }

    #[must_use]
    pub fn add_child(mut self, child: impl Into<Self>) -> Self {
        self.extra.push(child.into());
        self
    }

    /// `true` when the component renders nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let own = match &self.content {
            TextContent::Text { text } => text.is_empty(),
            TextContent::Translate { .. } | TextContent::Keybind { .. } => false,
        };

        own && self.extra.iter().all(Text::is_empty)
    }

    /// The literal text of this component and its children, without formatting.
    ///
    /// Translated and keybind components contribute their key.
    #[must_use]
    pub fn to_plain(&self) -> String {
        let mut out = String::new();
        self.write_plain(&mut out);
        out
    }

    fn write_plain(&self, out: &mut String) {
        match &self.content {
            TextContent::Text { text } => out.push_str(text),
            TextContent::Translate { translate, .. } => out.push_str(translate),
            TextContent::Keybind { keybind } => out.push_str(keybind),
        }

        for child in &self.extra {
            child.write_plain(out);
        }
    }

    /// Serializes the component to the JSON string stored in item NBT.
    ///
    /// # Panics
    ///
    /// Never in practice: every field serializes to a JSON value with string keys.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("text components always serialize")
    }

    /// Parses a JSON component. Bare JSON strings are accepted as plain text.
    pub fn from_json(json: &str) -> serde_json::Result<Text<'static>> {
        match serde_json::from_str::<Text<'static>>(json) {
            Ok(text) => Ok(text),
            Err(err) => match serde_json::from_str::<String>(json) {
                Ok(plain) => Ok(Text::from(plain)),
                Err(_) => Err(err),
            },
        }
    }

    #[must_use]
    pub fn into_owned(self) -> Text<'static> {
        let content = match self.content {
            TextContent::Text { text } => TextContent::Text {
                text: Cow::Owned(text.into_owned()),
            },
            TextContent::Translate { translate, with } => TextContent::Translate {
                translate: Cow::Owned(translate.into_owned()),
                with: with.into_iter().map(Text::into_owned).collect(),
            },
            TextContent::Keybind { keybind } => TextContent::Keybind {
                keybind: Cow::Owned(keybind.into_owned()),
            },
        };

        Text {
            content,
            color: self.color,
            font: self.font,
            bold: self.bold,
            italic: self.italic,
            underlined: self.underlined,
            strikethrough: self.strikethrough,
            obfuscated: self.obfuscated,
            insertion: self.insertion.map(|s| Cow::Owned(s.into_owned())),
            click_event: self.click_event.map(|e| Box::new(e.into_owned())),
            hover_event: self.hover_event.map(|e| Box::new(e.into_owned())),
            extra: self.extra.into_iter().map(Text::into_owned).collect(),
        }
    }
}

impl Text<'static> {
    /// Plain text that owns its string.
    #[must_use]
    pub fn owned(s: impl Into<String>) -> Self {
        Self::from(s.into())
    }
}

// Implement From trait for &str to Text conversion
impl<'a> From<&'a str> for Text<'a> {
    fn from(s: &'a str) -> Self {
        Text::new(s)
    }
}

impl From<String> for Text<'_> {
    fn from(s: String) -> Self {
        Text::from_content(TextContent::Text {
            text: Cow::Owned(s),
        })
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "these are tests")]
mod tests {
    use super::*;
    use crate::NamedColor;

    #[test]
    fn test_text_creation_and_conversion() {
        let text1 = Text::new("Hello, world!");
        let text2: Text<'_> = "Hello, world!".into();

        assert_eq!(text1, text2);
    }

    #[test]
    fn test_json_shape() {
        let text = Text::new("Rock")
            .color(Color::Named(NamedColor::Gray))
            .italic(false);

        assert_eq!(
            text.to_json(),
            r#"{"text":"Rock","color":"gray","italic":false}"#
        );
    }

    #[test]
    fn test_from_json_accepts_bare_strings() {
        let text = Text::from_json(r#""plain""#).unwrap();
        assert_eq!(text.to_plain(), "plain");

        let text = Text::from_json(r#"{"text":"a","extra":[{"text":"b"}]}"#).unwrap();
        assert_eq!(text.to_plain(), "ab");

        assert!(Text::from_json("{not json").is_err());
    }

    #[test]
    fn test_is_empty() {
        assert!(Text::new("").is_empty());
        assert!(Text::new("").add_child("").is_empty());
        assert!(!Text::new("").add_child("x").is_empty());
        assert!(!Text::translate("item.minecraft.stone").is_empty());
    }
}
