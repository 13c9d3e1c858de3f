use serde::{Deserialize, Serialize};
use snafu::ensure;
use tracing::trace;
use valence_protocol::{
    ItemKind,
    nbt::{Compound, Value},
};

use crate::{
    Firework, Rgb,
    builder::ItemBuilder,
    error::{EmptyEffectSnafu, InvalidPowerSnafu, Result, UnsupportedSnafu},
    tag,
};

const FIREWORKS: &str = "Fireworks";
const FLIGHT: &str = "Flight";
const EXPLOSIONS: &str = "Explosions";
const EXPLOSION: &str = "Explosion";

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FireworkShape {
    #[default]
    SmallBall,
    LargeBall,
    Star,
    Creeper,
    Burst,
}

impl FireworkShape {
    pub const ALL: [Self; 5] = [
        Self::SmallBall,
        Self::LargeBall,
        Self::Star,
        Self::Creeper,
        Self::Burst,
    ];

    #[must_use]
    pub const fn id(self) -> i8 {
        self as i8
    }

    #[must_use]
    pub fn from_id(id: i32) -> Option<Self> {
        usize::try_from(id).ok().and_then(|id| Self::ALL.get(id).copied())
    }
}

/// A single explosion of a rocket or star.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FireworkEffect {
    pub shape: FireworkShape,
    pub colors: Vec<Rgb>,
    pub fade_colors: Vec<Rgb>,
    pub flicker: bool,
    pub trail: bool,
}

impl FireworkEffect {
    #[must_use]
    pub const fn new(shape: FireworkShape) -> Self {
        Self {
            shape,
            colors: Vec::new(),
            fade_colors: Vec::new(),
            flicker: false,
            trail: false,
        }
    }

    #[must_use]
    pub fn color(mut self, color: Rgb) -> Self {
        self.colors.push(color);
        self
    }

    #[must_use]
    pub fn colors(mut self, colors: impl IntoIterator<Item = Rgb>) -> Self {
        self.colors.extend(colors);
        self
    }

    #[must_use]
    pub fn fade(mut self, color: Rgb) -> Self {
        self.fade_colors.push(color);
        self
    }

    #[must_use]
    pub const fn flicker(mut self, flicker: bool) -> Self {
        self.flicker = flicker;
        self
    }

    #[must_use]
    pub const fn trail(mut self, trail: bool) -> Self {
        self.trail = trail;
        self
    }

    #[must_use]
    pub fn to_nbt(&self) -> Compound {
        let mut explosion = Compound::new();
        explosion.insert("Type", Value::Byte(self.shape.id()));
        explosion.insert("Colors", Value::IntArray(ints(&self.colors)));

        if !self.fade_colors.is_empty() {
            explosion.insert("FadeColors", Value::IntArray(ints(&self.fade_colors)));
        }

        tag::put_flag(&mut explosion, "Flicker", self.flicker);
        tag::put_flag(&mut explosion, "Trail", self.trail);
        explosion
    }

    #[must_use]
    pub fn from_nbt(explosion: &Compound) -> Self {
        let colors = |key: &str| -> Vec<Rgb> {
            tag::int_array(explosion, key)
                .iter()
                .copied()
                .map(Rgb::from_nbt)
                .collect()
        };

        Self {
            shape: tag::int(explosion, "Type")
                .and_then(FireworkShape::from_id)
                .unwrap_or_default(),
            colors: colors("Colors"),
            fade_colors: colors("FadeColors"),
            flicker: tag::flag(explosion, "Flicker"),
            trail: tag::flag(explosion, "Trail"),
        }
    }
}

fn ints(colors: &[Rgb]) -> Vec<i32> {
    colors.iter().copied().map(Rgb::to_nbt).collect()
}

/// What a rocket or star carries besides its kind.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct FireworkMeta {
    /// Flight duration of a rocket. Always `None` for stars.
    pub power: Option<u8>,
    pub effects: Vec<FireworkEffect>,
}

impl FireworkMeta {
    #[must_use]
    pub fn from_nbt(kind: ItemKind, root: &Compound) -> Self {
        if kind == ItemKind::FireworkStar {
            return Self {
                power: None,
                effects: tag::compound(root, EXPLOSION)
                    .map(FireworkEffect::from_nbt)
                    .into_iter()
                    .collect(),
            };
        }

        let Some(fireworks) = tag::compound(root, FIREWORKS) else {
            return Self::default();
        };

        Self {
            power: tag::int(fireworks, FLIGHT).and_then(|flight| u8::try_from(flight).ok()),
            effects: tag::compounds(fireworks, EXPLOSIONS)
                .iter()
                .map(FireworkEffect::from_nbt)
                .collect(),
        }
    }
}

impl ItemBuilder<'_, Firework> {
    /// Adds an explosion to a rocket, or sets the explosion of a star.
    pub fn effect(self, effect: FireworkEffect) -> Result<Self> {
        ensure!(!effect.colors.is_empty(), EmptyEffectSnafu);

        let explosion = effect.to_nbt();
        trace!(kind = ?self.stack.item, shape = ?effect.shape, "writing firework effect");

        if self.stack.item == ItemKind::FireworkStar {
            return Ok(self.edit(|root| {
                root.insert(EXPLOSION, Value::Compound(explosion));
            }));
        }

        Ok(self.edit(|root| {
            tag::with_compound(root, FIREWORKS, |fireworks| {
                let mut explosions = tag::take_compounds(fireworks, EXPLOSIONS);
                explosions.push(explosion);
                tag::put_compounds(fireworks, EXPLOSIONS, explosions);
            });
        }))
    }

    pub fn effects(self, effects: impl IntoIterator<Item = FireworkEffect>) -> Result<Self> {
        effects
            .into_iter()
            .try_fold(self, |builder, effect| builder.effect(effect))
    }

    /// Sets the flight duration of a rocket.
    pub fn power(self, power: u8) -> Result<Self> {
        let kind = self.stack.item;
        ensure!(kind != ItemKind::FireworkStar, UnsupportedSnafu {
            operation: "power",
            kind
        });

        let Ok(flight) = i8::try_from(power) else {
            return InvalidPowerSnafu { power }.fail();
        };

        Ok(self.edit(|root| {
            tag::with_compound(root, FIREWORKS, |fireworks| {
                fireworks.insert(FLIGHT, Value::Byte(flight));
            });
        }))
    }
}
