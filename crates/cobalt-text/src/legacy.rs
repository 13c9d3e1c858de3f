//! Legacy `§` formatting codes.
//!
//! Plugin configs and chat plugins still write colors as `§a`/`&a`. These are
//! converted into a component tree so they can be stored as JSON text.

use crate::{Color, NamedColor, Text};

/// The section sign used by the vanilla client.
pub const SECTION: char = '§';
/// The alternate marker commonly used in config files.
pub const AMPERSAND: char = '&';

#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
struct Style {
    color: Option<Color>,
    bold: bool,
    italic: bool,
    underlined: bool,
    strikethrough: bool,
    obfuscated: bool,
}

impl Style {
    fn apply(self, text: String) -> Text<'static> {
        let mut text = Text::from(text);
        text.color = self.color;
        text.bold = self.bold.then_some(true);
        text.italic = self.italic.then_some(true);
        text.underlined = self.underlined.then_some(true);
        text.strikethrough = self.strikethrough.then_some(true);
        text.obfuscated = self.obfuscated.then_some(true);
        text
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    marker: char,
    style: Style,
    buffer: String,
    segments: Vec<Text<'static>>,
}

impl Parser {
    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.buffer);
        self.segments.push(self.style.apply(text));
    }

    fn restyle(&mut self, style: Style) {
        self.flush();
        self.style = style;
    }

    /// Reads `§x§r§r§g§g§b§b` after the `x` has been consumed.
    fn bukkit_hex(&mut self) -> Option<Color> {
        let mut hex = String::from("#");
        let mut pos = self.pos;

        for _ in 0..6 {
            if self.chars.get(pos) != Some(&self.marker) {
                return None;
            }
            let digit = *self.chars.get(pos + 1)?;
            if !digit.is_ascii_hexdigit() {
                return None;
            }
            hex.push(digit);
            pos += 2;
        }

        let color = Color::from_hex(&hex).ok()?;
        self.pos = pos;
        Some(color)
    }

    /// Reads `&#rrggbb` after the `#` has been consumed.
    fn short_hex(&mut self) -> Option<Color> {
        let digits = self.chars.get(self.pos..self.pos + 6)?;
        let hex: String = std::iter::once('#').chain(digits.iter().copied()).collect();

        let color = Color::from_hex(&hex).ok()?;
        self.pos += 6;
        Some(color)
    }

    fn code(&mut self, code: char) -> bool {
        if let Some(color) = NamedColor::from_code(code) {
            self.restyle(Style {
                color: Some(Color::Named(color)),
                ..Style::default()
            });
            return true;
        }

        let mut style = self.style;
        match code.to_ascii_lowercase() {
            'k' => style.obfuscated = true,
            'l' => style.bold = true,
            'm' => style.strikethrough = true,
            'n' => style.underlined = true,
            'o' => style.italic = true,
            'r' => style = Style::default(),
            'x' => {
                let Some(color) = self.bukkit_hex() else {
                    return false;
                };
                style = Style {
                    color: Some(color),
                    ..Style::default()
                };
            }
            '#' if self.marker == AMPERSAND => {
                let Some(color) = self.short_hex() else {
                    return false;
                };
                style = Style {
                    color: Some(color),
                    ..Style::default()
                };
            }
            _ => return false,
        }

        self.restyle(style);
        true
    }

    fn run(mut self) -> Text<'static> {
        while let Some(&c) = self.chars.get(self.pos) {
            self.pos += 1;

            if c != self.marker {
                self.buffer.push(c);
                continue;
            }

            let Some(&code) = self.chars.get(self.pos) else {
                self.buffer.push(c);
                continue;
            };
            self.pos += 1;

            if !self.code(code) {
                self.buffer.push(c);
                self.buffer.push(code);
            }
        }

        self.flush();

        let mut segments = self.segments;
        if segments.len() == 1 {
            return segments.remove(0);
        }

        let mut root = Text::from(String::new());
        root.extra = segments;
        root
    }
}

/// Parses `input`, treating `marker` as the start of a formatting code.
///
/// Unknown codes are kept as literal text.
#[must_use]
pub fn parse(input: &str, marker: char) -> Text<'static> {
    Parser {
        chars: input.chars().collect(),
        pos: 0,
        marker,
        style: Style::default(),
        buffer: String::new(),
        segments: Vec::new(),
    }
    .run()
}

/// Replaces `&` codes with `§`, leaving everything else untouched.
#[must_use]
pub fn translate_alternate(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        let is_code = chars
            .peek()
            .is_some_and(|next| "0123456789abcdefklmnorx".contains(next.to_ascii_lowercase()));

        if c == AMPERSAND && is_code {
            out.push(SECTION);
        } else {
            out.push(c);
        }
    }

    out
}
