//! Player profiles stored on player heads.
//!
//! The texture of a head lives in the `textures` property of the
//! profile under `SkullOwner`. [`ProfileInstaller`] is the one seam that writes
//! that profile, so alternative backends (or failing ones, in tests) can be
//! swapped in without touching the builders.

use base64::{
    Engine,
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use snafu::{OptionExt, ResultExt, Snafu};
use tracing::debug;
use uuid::Uuid;
use valence_protocol::nbt::{Compound, List, Value};

use crate::tag;

pub const SKULL_OWNER: &str = "SkullOwner";
pub const TEXTURES: &str = "textures";

/// Mojang pads texture values, hand-made ones frequently are not.
const TEXTURE_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ProfileError {
    #[snafu(display("texture is not valid base64"))]
    InvalidBase64 { source: base64::DecodeError },

    #[snafu(display("texture does not decode to a JSON object"))]
    InvalidPayload { source: serde_json::Error },

    #[snafu(display("texture payload has no `textures` entry"))]
    MissingTextures,

    #[snafu(display("profile backend failed"))]
    Backend {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// A single profile property, e.g. `textures`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Property {
    pub name: String,
    pub value: String,
    pub signature: Option<String>,
}

/// The profile a player head renders.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GameProfile {
    pub id: Uuid,
    pub name: Option<String>,
    pub properties: Vec<Property>,
}

impl GameProfile {
    #[must_use]
    pub const fn new(id: Uuid, name: Option<String>) -> Self {
        Self {
            id,
            name,
            properties: Vec::new(),
        }
    }

    /// A nameless profile with a random id carrying only a texture.
    #[must_use]
    pub fn textured(texture: impl Into<String>) -> Self {
        Self::new(Uuid::new_v4(), None).with_texture(texture)
    }

    /// Replaces the `textures` property.
    #[must_use]
    pub fn with_texture(mut self, texture: impl Into<String>) -> Self {
        self.properties.retain(|p| p.name != TEXTURES);
        self.properties.push(Property {
            name: TEXTURES.to_owned(),
            value: texture.into(),
            signature: None,
        });
        self
    }

    /// The base64 `textures` value, if any.
    #[must_use]
    pub fn texture(&self) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.name == TEXTURES)
            .map(|p| p.value.as_str())
    }

    /// The skin URL inside the texture payload.
    #[must_use]
    pub fn skin_url(&self) -> Option<String> {
        let payload = decode_texture(self.texture()?).ok()?;
        payload
            .get("textures")?
            .get("SKIN")?
            .get("url")?
            .as_str()
            .map(str::to_owned)
    }

    #[must_use]
    pub fn to_nbt(&self) -> Compound {
        let mut owner = Compound::new();
        owner.insert("Id", Value::IntArray(uuid_to_ints(self.id).to_vec()));

        if let Some(name) = &self.name {
            owner.insert("Name", Value::String(name.clone()));
        }

        let mut properties = Compound::new();
        for property in &self.properties {
            let mut entry = Compound::new();
            entry.insert("Value", Value::String(property.value.clone()));
            if let Some(signature) = &property.signature {
                entry.insert("Signature", Value::String(signature.clone()));
            }

            let mut values = tag::take_compounds(&mut properties, &property.name);
            values.push(entry);
            tag::put_compounds(&mut properties, &property.name, values);
        }

        if !properties.is_empty() {
            owner.insert("Properties", Value::Compound(properties));
        }

        owner
    }

    /// Reads a `SkullOwner` compound. Profiles without a well-formed id get the nil id.
    #[must_use]
    pub fn from_nbt(owner: &Compound) -> Self {
        let id = <[i32; 4]>::try_from(tag::int_array(owner, "Id"))
            .map(ints_to_uuid)
            .unwrap_or_default();

        let mut properties = Vec::new();
        if let Some(stored) = tag::compound(owner, "Properties") {
            for (name, values) in stored.iter() {
                let Value::List(List::Compound(values)) = values else {
                    continue;
                };

                for value in values {
                    let Some(text) = tag::string(value, "Value") else {
                        continue;
                    };

                    properties.push(Property {
                        name: name.clone(),
                        value: text.to_owned(),
                        signature: tag::string(value, "Signature").map(str::to_owned),
                    });
                }
            }
        }

        Self {
            id,
            name: tag::string(owner, "Name").map(str::to_owned),
            properties,
        }
    }
}

/// Installs a profile into an item's tag compound.
///
/// Implementations must leave `tag` untouched when they fail.
pub trait ProfileInstaller {
    fn install(&self, tag: &mut Compound, profile: &GameProfile) -> Result<(), ProfileError>;
}

/// Writes the profile to `SkullOwner`, the vanilla location.
///
/// Texture properties are checked to be base64 JSON with a `textures` entry
/// before anything is written.
#[derive(Copy, Clone, Debug, Default)]
pub struct SkullOwnerInstaller;

impl ProfileInstaller for SkullOwnerInstaller {
    fn install(&self, tag: &mut Compound, profile: &GameProfile) -> Result<(), ProfileError> {
        for property in profile.properties.iter().filter(|p| p.name == TEXTURES) {
            let payload = decode_texture(&property.value)?;
            payload.get("textures").context(MissingTexturesSnafu)?;
        }

        debug!(id = %profile.id, name = ?profile.name, "installing skull profile");
        tag.insert(SKULL_OWNER, Value::Compound(profile.to_nbt()));
        Ok(())
    }
}

fn decode_texture(texture: &str) -> Result<serde_json::Map<String, serde_json::Value>, ProfileError> {
    let bytes = TEXTURE_ENGINE.decode(texture).context(InvalidBase64Snafu)?;
    serde_json::from_slice(&bytes).context(InvalidPayloadSnafu)
}

/// Builds a texture value pointing at a skin on `textures.minecraft.net`.
#[must_use]
pub fn encode_skin_url(url: &str) -> String {
    let payload = serde_json::json!({ "textures": { "SKIN": { "url": url } } });
    base64::engine::general_purpose::STANDARD.encode(payload.to_string())
}

/// The int-array layout vanilla uses for UUIDs: most significant word first.
#[must_use]
pub fn uuid_to_ints(id: Uuid) -> [i32; 4] {
    let bytes = id.as_bytes();
    std::array::from_fn(|i| {
        let at = i * 4;
        i32::from_be_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
    })
}

#[must_use]
pub fn ints_to_uuid(ints: [i32; 4]) -> Uuid {
    let mut bytes = [0; 16];
    for (chunk, int) in bytes.chunks_exact_mut(4).zip(ints) {
        chunk.copy_from_slice(&int.to_be_bytes());
    }
    Uuid::from_bytes(bytes)
}
