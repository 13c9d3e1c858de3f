use valence_protocol::nbt::{Compound, Value};

use crate::{Map, Rgb, builder::ItemBuilder, tag};

const MAP_ID: &str = "map";
const MAP_COLOR: &str = "MapColor";
const LOCATION_NAME: &str = "LocName";
const SCALING: &str = "map_is_scaling";

/// What a filled map carries besides its kind.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct MapMeta {
    pub id: Option<i32>,
    pub color: Option<Rgb>,
    pub location_name: Option<String>,
    pub scaling: Option<bool>,
}

impl MapMeta {
    #[must_use]
    pub fn from_nbt(root: &Compound) -> Self {
        let display = tag::compound(root, tag::DISPLAY);

        Self {
            id: tag::int(root, MAP_ID),
            color: display
                .and_then(|display| tag::int(display, MAP_COLOR))
                .map(Rgb::from_nbt),
            location_name: display
                .and_then(|display| tag::string(display, LOCATION_NAME))
                .map(str::to_owned),
            scaling: root.get(SCALING).map(|_| tag::flag(root, SCALING)),
        }
    }
}

impl ItemBuilder<'_, Map> {
    /// Which map data the item shows.
    pub fn id(self, id: i32) -> Self {
        self.edit(|root| {
            root.insert(MAP_ID, Value::Int(id));
        })
    }

    /// Tints the map item icon.
    pub fn color(self, color: Rgb) -> Self {
        self.edit_display(|display| {
            display.insert(MAP_COLOR, Value::Int(color.to_nbt()));
        })
    }

    pub fn location_name(self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.edit_display(|display| {
            display.insert(LOCATION_NAME, Value::String(name));
        })
    }

    pub fn scaling(self, scaling: bool) -> Self {
        self.edit(|root| tag::put_flag(root, SCALING, scaling))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ItemExt, ItemMeta};

    #[test]
    fn test_map_meta() {
        let map = ItemBuilder::map()
            .id(7)
            .color(Rgb::new(0x12, 0x34, 0x56))
            .location_name("Spawn")
            .scaling(false)
            .build();

        assert_eq!(
            map.meta(),
            ItemMeta::Map(MapMeta {
                id: Some(7),
                color: Some(Rgb::new(0x12, 0x34, 0x56)),
                location_name: Some("Spawn".to_owned()),
                scaling: Some(false),
            })
        );
    }

    #[test]
    fn test_empty_map() {
        let map = ItemBuilder::map().build();
        assert_eq!(map.nbt, None);
        assert_eq!(map.meta(), ItemMeta::Map(MapMeta::default()));
    }
}
