use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use snafu::{OptionExt, Snafu};

/// A 24-bit color as stored in leather, potion, map and firework tags.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(u32);

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(display("invalid color {value:?}, expected #rrggbb"))]
pub struct InvalidRgb {
    value: String,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Keeps the low 24 bits.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits & 0x00ff_ffff)
    }

    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn to_nbt(self) -> i32 {
        bytemuck::cast(self.0)
    }

    #[must_use]
    pub fn from_nbt(value: i32) -> Self {
        Self::from_bits(bytemuck::cast(value))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

impl FromStr for Rgb {
    type Err = InvalidRgb;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.chars().all(|c| c.is_ascii_hexdigit()))
            .context(InvalidRgbSnafu { value: s })?;

        u32::from_str_radix(digits, 16)
            .ok()
            .map(Self)
            .context(InvalidRgbSnafu { value: s })
    }
}

impl TryFrom<String> for Rgb {
    type Error = InvalidRgb;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

/// The sixteen dye colors, in network id order.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DyeColor {
    White,
    Orange,
    Magenta,
    LightBlue,
    Yellow,
    Lime,
    Pink,
    Gray,
    LightGray,
    Cyan,
    Purple,
    Blue,
    Brown,
    Green,
    Red,
    Black,
}

impl DyeColor {
    pub const ALL: [Self; 16] = [
        Self::White,
        Self::Orange,
        Self::Magenta,
        Self::LightBlue,
        Self::Yellow,
        Self::Lime,
        Self::Pink,
        Self::Gray,
        Self::LightGray,
        Self::Cyan,
        Self::Purple,
        Self::Blue,
        Self::Brown,
        Self::Green,
        Self::Red,
        Self::Black,
    ];

    #[must_use]
    pub const fn id(self) -> i32 {
        self as i32
    }

    #[must_use]
    pub fn from_id(id: i32) -> Option<Self> {
        usize::try_from(id).ok().and_then(|id| Self::ALL.get(id).copied())
    }

    /// The color a firework star crafted with this dye explodes in.
    #[must_use]
    pub const fn firework_color(self) -> Rgb {
        Rgb::from_bits(match self {
            Self::White => 0x00F0_F0F0,
            Self::Orange => 0x00EB_8844,
            Self::Magenta => 0x00C3_54CD,
            Self::LightBlue => 0x0066_89D3,
            Self::Yellow => 0x00DE_CF2A,
            Self::Lime => 0x0041_CD34,
            Self::Pink => 0x00D8_8198,
            Self::Gray => 0x0043_4343,
            Self::LightGray => 0x00AB_ABAB,
            Self::Cyan => 0x0028_7697,
            Self::Purple => 0x007B_2FBE,
            Self::Blue => 0x0025_3192,
            Self::Brown => 0x0051_3014,
            Self::Green => 0x003B_511A,
            Self::Red => 0x00B3_312C,
            Self::Black => 0x001E_1B1B,
        })
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "these are tests")]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_parsing() {
        assert_eq!("#ff0000".parse::<Rgb>().unwrap(), Rgb::new(255, 0, 0));
        assert_eq!(Rgb::new(1, 2, 3).to_string(), "#010203");
        assert!("ff0000".parse::<Rgb>().is_err());
        assert!("#fff".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_invalid_rgb_message() {
        let err = "#12345g".parse::<Rgb>().unwrap_err();
        assert_eq!(err.to_string(), "invalid color \"#12345g\", expected #rrggbb");
    }

    #[test]
    fn test_nbt_conversion_keeps_bits() {
        let white = Rgb::new(255, 255, 255);
        assert_eq!(white.to_nbt(), 0x00ff_ffff);
        assert_eq!(Rgb::from_nbt(-1), white);
    }

    #[test]
    fn test_dye_ids() {
        assert_eq!(DyeColor::White.id(), 0);
        assert_eq!(DyeColor::Black.id(), 15);
        assert_eq!(DyeColor::from_id(14), Some(DyeColor::Red));
        assert_eq!(DyeColor::from_id(16), None);
        assert_eq!(DyeColor::from_id(-1), None);
    }
}
