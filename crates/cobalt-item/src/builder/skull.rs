use derive_more::Constructor;
use serde::{Deserialize, Serialize};
use snafu::ResultExt;
use tracing::debug;
use uuid::Uuid;
use valence_protocol::nbt::Value;

use crate::{
    Skull,
    builder::ItemBuilder,
    error::{Result, SetupFailureSnafu},
    profile::{GameProfile, ProfileInstaller, SKULL_OWNER, SkullOwnerInstaller, encode_skin_url},
};

/// A player a head can belong to.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, Constructor)]
pub struct PlayerRef {
    pub uuid: Uuid,
    pub name: String,
}

impl ItemBuilder<'_, Skull> {
    /// Shows the head of `player`. The client fetches the skin itself.
    pub fn owner(self, player: PlayerRef) -> Self {
        let profile = GameProfile::new(player.uuid, Some(player.name));
        debug!(id = %profile.id, name = ?profile.name, "setting skull owner");

        self.edit(|root| {
            root.insert(SKULL_OWNER, Value::Compound(profile.to_nbt()));
        })
    }

    /// Shows a skin from a base64 `textures` value.
    pub fn texture(self, texture: impl Into<String>) -> Result<Self> {
        self.texture_with(&SkullOwnerInstaller, texture)
    }

    /// Shows the skin at `url`, normally on `textures.minecraft.net`.
    pub fn texture_url(self, url: &str) -> Result<Self> {
        self.texture(encode_skin_url(url))
    }

    /// Like [`Self::texture`] but installs the profile through `installer`.
    pub fn texture_with(
        self,
        installer: &dyn ProfileInstaller,
        texture: impl Into<String>,
    ) -> Result<Self> {
        self.profile_with(installer, GameProfile::textured(texture))
    }

    /// Installs a complete profile, e.g. an owner together with a texture.
    pub fn profile(self, profile: GameProfile) -> Result<Self> {
        self.profile_with(&SkullOwnerInstaller, profile)
    }

    pub fn profile_with(
        mut self,
        installer: &dyn ProfileInstaller,
        profile: GameProfile,
    ) -> Result<Self> {
        installer
            .install(self.tag(), &profile)
            .context(SetupFailureSnafu)?;
        Ok(self)
    }
}
