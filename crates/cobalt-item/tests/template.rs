#![expect(clippy::unwrap_used, reason = "these are tests")]

use cobalt_item::{
    BannerPattern, DyeColor, Enchantment, Error, Generation, ItemExt, ItemFlag, ItemMeta,
    ItemTemplates, PatternType, Rgb, profile::encode_skin_url,
};
use valence_protocol::ItemKind;

const TEMPLATES: &str = r##"
[rock]
kind = "minecraft:stone"
amount = 4
name = "&7Rock"
lore = ["&8Heavy", "&8Grey"]

[blade]
kind = "diamond_sword"
unbreakable = true
damage = 12
model = 1001
flags = ["hide_attributes"]

[blade.enchantments]
sharpness = 5
looting = 3

[cape]
kind = "red_banner"
patterns = [
    { color = "white", pattern = "cross" },
    { color = "black", pattern = "border" },
]

[guide]
kind = "written_book"

[guide.book]
author = "Server"
title = "&lRules"
generation = "copy_of_original"
pages = ["Be nice", "Have fun"]

[rocket]
kind = "firework_rocket"

[rocket.firework]
power = 2

[[rocket.firework.effects]]
shape = "star"
colors = ["#ff0000", "#00ff00"]
trail = true

[atlas]
kind = "filled_map"

[atlas.map]
id = 3
location_name = "Spawn"
scaling = true

[boots]
kind = "leather_boots"
color = "#123456"
glow = true

[typo]
kind = "stone"
patterns = [{ color = "white", pattern = "cross" }]
"##;

fn templates() -> ItemTemplates {
    ItemTemplates::from_toml(TEMPLATES).unwrap()
}

fn build(name: &str) -> Result<valence_protocol::ItemStack, Error> {
    templates().get(name).unwrap().build()
}

#[test]
fn test_loads_every_template() {
    let templates = templates();
    let names: Vec<_> = templates.iter().map(|(name, _)| name).collect();

    assert_eq!(names, [
        "atlas", "blade", "boots", "cape", "guide", "rock", "rocket", "typo"
    ]);
}

#[test]
fn test_rock() {
    let rock = build("rock").unwrap();

    assert_eq!(rock.item, ItemKind::Stone);
    assert_eq!(rock.count, 4);
    assert_eq!(rock.display_name().unwrap().to_plain(), "Rock");

    let lore: Vec<_> = rock.lore().iter().map(|line| line.to_plain()).collect();
    assert_eq!(lore, ["Heavy", "Grey"]);
}

#[test]
fn test_blade() {
    let blade = build("blade").unwrap();

    assert!(blade.is_unbreakable());
    assert_eq!(blade.damage(), Some(12));
    assert_eq!(blade.custom_model_data(), Some(1001));
    assert!(blade.item_flags().contains(ItemFlag::HideAttributes));
    assert_eq!(blade.enchantments()[&Enchantment::Sharpness], 5);
    assert_eq!(blade.enchantments()[&Enchantment::Looting], 3);
}

#[test]
fn test_cape() {
    let cape = build("cape").unwrap();

    assert_eq!(
        cape.meta(),
        ItemMeta::Banner(vec![
            BannerPattern::new(DyeColor::White, PatternType::Cross),
            BannerPattern::new(DyeColor::Black, PatternType::Border),
        ])
    );
}

#[test]
fn test_guide() {
    let ItemMeta::Book(book) = build("guide").unwrap().meta() else {
        panic!("expected a book");
    };

    assert_eq!(book.author.as_deref(), Some("Server"));
    assert_eq!(book.title.as_deref(), Some("Rules"));
    assert_eq!(book.generation, Some(Generation::CopyOfOriginal));
    assert_eq!(book.pages.len(), 2);
}

#[test]
fn test_rocket() {
    let ItemMeta::Firework(firework) = build("rocket").unwrap().meta() else {
        panic!("expected a firework");
    };

    assert_eq!(firework.power, Some(2));
    assert_eq!(firework.effects.len(), 1);
    assert_eq!(firework.effects[0].colors, [
        Rgb::new(255, 0, 0),
        Rgb::new(0, 255, 0)
    ]);
    assert!(firework.effects[0].trail);
}

#[test]
fn test_atlas() {
    let ItemMeta::Map(map) = build("atlas").unwrap().meta() else {
        panic!("expected a map");
    };

    assert_eq!(map.id, Some(3));
    assert_eq!(map.location_name.as_deref(), Some("Spawn"));
    assert_eq!(map.scaling, Some(true));
}

#[test]
fn test_boots() {
    let boots = build("boots").unwrap();

    assert!(boots.item_flags().contains(ItemFlag::HideEnchantments));
    assert_eq!(boots.enchantments().get(&Enchantment::Lure), Some(&1));
}

#[test]
fn test_category_section_on_wrong_kind() {
    let err = build("typo").unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));
}

#[test]
fn test_head_with_owner_and_texture() {
    let texture = encode_skin_url("http://textures.minecraft.net/texture/feed");
    let source = format!(
        r#"
        [head]
        kind = "player_head"
        texture = "{texture}"
        owner = {{ uuid = "86271406-1188-44a5-8496-7af10c906204", name = "Alex" }}
        "#
    );

    let templates = ItemTemplates::from_toml(&source).unwrap();
    let head = templates.get("head").unwrap().build().unwrap();
    let profile = head.skull_profile().unwrap();

    assert_eq!(profile.id.to_string(), "86271406-1188-44a5-8496-7af10c906204");
    assert_eq!(profile.name.as_deref(), Some("Alex"));
    assert_eq!(head.skull_texture(), Some(texture));
}

#[test]
fn test_unknown_item() {
    let templates = ItemTemplates::from_toml("[nope]\nkind = \"minecraft:unobtainium\"").unwrap();
    let err = templates.get("nope").unwrap().build().unwrap_err();

    assert!(matches!(err, Error::UnknownItem { ident } if ident == "minecraft:unobtainium"));
}

#[test]
fn test_malformed_toml() {
    let err = ItemTemplates::from_toml("[broken").unwrap_err();
    assert!(matches!(err, Error::Template { .. }));
}
