use derive_more::Constructor;
use serde::{Deserialize, Serialize};
use snafu::ensure;
use valence_protocol::nbt::{Compound, Value};

use crate::{
    Banner, DyeColor,
    builder::ItemBuilder,
    error::{IndexOutOfBoundsSnafu, Result},
    tag,
};

pub(crate) const BLOCK_ENTITY_TAG: &str = "BlockEntityTag";
pub(crate) const PATTERNS: &str = "Patterns";

macro_rules! patterns {
    ($($variant:ident => $code:literal,)*) => {
        /// Banner pattern shapes in Minecraft 1.20.1.
        #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum PatternType {
            $($variant,)*
        }

        impl PatternType {
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// The short code stored in the `Pattern` field.
            #[must_use]
            pub const fn code(self) -> &'static str {
                match self {
                    $(Self::$variant => $code,)*
                }
            }
        }
    };
}

patterns! {
    Base => "b",
    SquareBottomLeft => "bl",
    SquareBottomRight => "br",
    SquareTopLeft => "tl",
    SquareTopRight => "tr",
    StripeBottom => "bs",
    StripeTop => "ts",
    StripeLeft => "ls",
    StripeRight => "rs",
    StripeCenter => "cs",
    StripeMiddle => "ms",
    StripeDownright => "drs",
    StripeDownleft => "dls",
    SmallStripes => "ss",
    Cross => "cr",
    StraightCross => "sc",
    TriangleBottom => "bt",
    TriangleTop => "tt",
    TrianglesBottom => "bts",
    TrianglesTop => "tts",
    DiagonalLeft => "ld",
    DiagonalUpRight => "rd",
    DiagonalUpLeft => "lud",
    DiagonalRight => "rud",
    Circle => "mc",
    Rhombus => "mr",
    HalfVertical => "vh",
    HalfHorizontal => "hh",
    HalfVerticalRight => "vhr",
    HalfHorizontalBottom => "hhb",
    Border => "bo",
    CurlyBorder => "cbo",
    Gradient => "gra",
    GradientUp => "gru",
    Bricks => "bri",
    Globe => "glb",
    Creeper => "cre",
    Skull => "sku",
    Flower => "flo",
    Mojang => "moj",
    Piglin => "pig",
}

impl PatternType {
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.code() == code)
    }
}

/// One layer of a banner.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, Constructor)]
pub struct BannerPattern {
    pub color: DyeColor,
    pub pattern: PatternType,
}

impl BannerPattern {
    #[must_use]
    pub fn to_nbt(self) -> Compound {
        let mut layer = Compound::new();
        layer.insert("Pattern", Value::String(self.pattern.code().to_owned()));
        layer.insert("Color", Value::Int(self.color.id()));
        layer
    }

    /// `None` for layers with an unknown code or color.
    #[must_use]
    pub fn from_nbt(layer: &Compound) -> Option<Self> {
        let pattern = PatternType::from_code(tag::string(layer, "Pattern")?)?;
        let color = DyeColor::from_id(tag::int(layer, "Color")?)?;
        Some(Self { color, pattern })
    }
}

impl ItemBuilder<'_, Banner> {
    fn edit_layers(self, f: impl FnOnce(&mut Vec<Compound>)) -> Self {
        self.edit(|root| {
            tag::with_compound(root, BLOCK_ENTITY_TAG, |block_entity| {
                let mut layers = tag::take_compounds(block_entity, PATTERNS);
                f(&mut layers);
                tag::put_compounds(block_entity, PATTERNS, layers);
            });
        })
    }

    fn layer_count(&self) -> usize {
        self.stack
            .nbt
            .as_ref()
            .and_then(|root| tag::compound(root, BLOCK_ENTITY_TAG))
            .map_or(0, |block_entity| tag::compounds(block_entity, PATTERNS).len())
    }

    /// Adds a layer on top of the existing ones.
    pub fn pattern(self, color: DyeColor, pattern: PatternType) -> Self {
        self.patterns([BannerPattern::new(color, pattern)])
    }

    pub fn patterns(self, patterns: impl IntoIterator<Item = BannerPattern>) -> Self {
        self.edit_layers(|layers| layers.extend(patterns.into_iter().map(BannerPattern::to_nbt)))
    }

    /// Replaces the layer at `index`.
    pub fn set_pattern(self, index: usize, pattern: BannerPattern) -> Result<Self> {
        let len = self.layer_count();
        ensure!(index < len, IndexOutOfBoundsSnafu {
            what: "pattern",
            index,
            len
        });

        Ok(self.edit_layers(|layers| layers[index] = pattern.to_nbt()))
    }

    pub fn clear_patterns(self) -> Self {
        self.edit_layers(Vec::clear)
    }
}
