use serde::{Deserialize, Serialize};

macro_rules! enchantments {
    ($($variant:ident => $ident:literal, $max:literal;)*) => {
        /// Every enchantment in Minecraft 1.20.1.
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum Enchantment {
            $($variant,)*
        }

        impl Enchantment {
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// The registry path, without the `minecraft:` namespace.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $ident,)*
                }
            }

            /// The highest level obtainable without commands.
            #[must_use]
            pub const fn max_level(self) -> u16 {
                match self {
                    $(Self::$variant => $max,)*
                }
            }
        }
    };
}

enchantments! {
    Protection => "protection", 4;
    FireProtection => "fire_protection", 4;
    FeatherFalling => "feather_falling", 4;
    BlastProtection => "blast_protection", 4;
    ProjectileProtection => "projectile_protection", 4;
    Respiration => "respiration", 3;
    AquaAffinity => "aqua_affinity", 1;
    Thorns => "thorns", 3;
    DepthStrider => "depth_strider", 3;
    FrostWalker => "frost_walker", 2;
    BindingCurse => "binding_curse", 1;
    SoulSpeed => "soul_speed", 3;
    SwiftSneak => "swift_sneak", 3;
    Sharpness => "sharpness", 5;
    Smite => "smite", 5;
    BaneOfArthropods => "bane_of_arthropods", 5;
    Knockback => "knockback", 2;
    FireAspect => "fire_aspect", 2;
    Looting => "looting", 3;
    Sweeping => "sweeping", 3;
    Efficiency => "efficiency", 5;
    SilkTouch => "silk_touch", 1;
    Unbreaking => "unbreaking", 3;
    Fortune => "fortune", 3;
    Power => "power", 5;
    Punch => "punch", 2;
    Flame => "flame", 1;
    Infinity => "infinity", 1;
    LuckOfTheSea => "luck_of_the_sea", 3;
    Lure => "lure", 3;
    Loyalty => "loyalty", 3;
    Impaling => "impaling", 5;
    Riptide => "riptide", 3;
    Channeling => "channeling", 1;
    Multishot => "multishot", 1;
    QuickCharge => "quick_charge", 3;
    Piercing => "piercing", 4;
    Mending => "mending", 1;
    VanishingCurse => "vanishing_curse", 1;
}

impl Enchantment {
    /// The namespaced id written to the `id` field of enchantment tags.
    #[must_use]
    pub fn ident(self) -> String {
        format!("minecraft:{}", self.name())
    }

    /// Accepts ids with or without the `minecraft:` namespace.
    #[must_use]
    pub fn from_ident(ident: &str) -> Option<Self> {
        let name = ident.strip_prefix("minecraft:").unwrap_or(ident);
        Self::ALL.iter().copied().find(|e| e.name() == name)
    }
}
