#![expect(clippy::unwrap_used, reason = "these are tests")]

use cobalt_item::{
    Banner, Book, Category, CategoryTag, DyeColor, Enchantment, Error, Firework, FireworkEffect,
    FireworkShape, GameProfile, ItemBuilder, ItemExt, ItemMeta, Map, PatternType, ProfileError,
    ProfileInstaller, Rgb, Skull, profile::encode_skin_url, strategy::PLAIN,
};
use proptest::prelude::*;
use valence_protocol::{
    ItemKind, ItemStack,
    nbt::{Compound, Value},
};

fn tagged(kind: ItemKind) -> ItemStack {
    let mut root = Compound::new();
    root.insert("marker", Value::Int(7));
    ItemStack::new(kind, 1, Some(root))
}

fn assert_rejected<C: CategoryTag>(stack: ItemStack) {
    let err = ItemBuilder::<C>::with_strategy(stack.clone(), &PLAIN).unwrap_err();

    match &err {
        Error::TypeMismatch { expected, .. } => assert_eq!(*expected, C::CATEGORY),
        other => panic!("expected a type mismatch, got {other:?}"),
    }

    assert_eq!(err.into_item(), Some(stack));
}

#[test]
fn test_rock() {
    let rock = ItemBuilder::from_kind(ItemKind::Stone)
        .name("Rock")
        .amount(4)
        .unwrap()
        .build();

    assert_eq!(rock.item, ItemKind::Stone);
    assert_eq!(rock.count, 4);
    assert_eq!(rock.display_name().unwrap().to_plain(), "Rock");
}

#[test]
fn test_enchant_overwrites() {
    let sword = ItemBuilder::from_kind(ItemKind::DiamondSword)
        .enchant(Enchantment::Sharpness, 3)
        .unwrap()
        .enchant(Enchantment::Sharpness, 5)
        .unwrap()
        .build();

    let enchantments = sword.enchantments();
    assert_eq!(enchantments.len(), 1);
    assert_eq!(enchantments[&Enchantment::Sharpness], 5);
}

#[test]
fn test_enchant_levels() {
    let err = ItemBuilder::from_kind(ItemKind::DiamondSword)
        .enchant(Enchantment::Sharpness, 6)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidLevel { max: 5, .. }));

    let sword = ItemBuilder::from_kind(ItemKind::DiamondSword)
        .enchant_unsafe(Enchantment::Sharpness, 10)
        .unwrap()
        .build();
    assert_eq!(sword.enchantments()[&Enchantment::Sharpness], 10);
}

#[test]
fn test_specialized_builders_reject_other_categories() {
    assert_rejected::<Banner>(tagged(ItemKind::Stone));
    assert_rejected::<Book>(tagged(ItemKind::EnchantedBook));
    assert_rejected::<Firework>(tagged(ItemKind::FireCharge));
    assert_rejected::<Map>(tagged(ItemKind::Compass));
    assert_rejected::<Skull>(tagged(ItemKind::ZombieHead));
}

#[test]
fn test_star_from_rejects_rockets() {
    let rocket = tagged(ItemKind::FireworkRocket);
    let err = ItemBuilder::star_from(rocket.clone()).unwrap_err();
    assert_eq!(err.into_item(), Some(rocket));
}

#[test]
fn test_from_existing_stacks() {
    let banner = ItemBuilder::banner_from(tagged(ItemKind::BlackBanner))
        .unwrap()
        .pattern(DyeColor::White, PatternType::Creeper)
        .build();

    assert_eq!(banner.item, ItemKind::BlackBanner);
    assert_eq!(banner.nbt.as_ref().unwrap().get("marker"), Some(&Value::Int(7)));
    assert!(matches!(banner.meta(), ItemMeta::Banner(patterns) if patterns.len() == 1));
}

#[test]
fn test_specialize_and_generalize() {
    let rocket = ItemBuilder::from_kind(ItemKind::FireworkRocket)
        .name("Boom")
        .specialize::<Firework>()
        .unwrap()
        .effect(FireworkEffect::new(FireworkShape::LargeBall).color(Rgb::new(255, 255, 0)))
        .unwrap()
        .generalize()
        .glow(true)
        .build();

    assert_eq!(rocket.category(), Category::Firework);
    assert_eq!(rocket.display_name().unwrap().to_plain(), "Boom");
    assert!(matches!(rocket.meta(), ItemMeta::Firework(meta) if meta.effects.len() == 1));
}

#[test]
fn test_skull_texture_round_trip() {
    let texture = encode_skin_url("http://textures.minecraft.net/texture/1a2b3c");
    let head = ItemBuilder::skull().texture(texture.clone()).unwrap().build();

    assert_eq!(head.skull_texture(), Some(texture));
    assert_eq!(
        head.skull_profile().unwrap().skin_url().as_deref(),
        Some("http://textures.minecraft.net/texture/1a2b3c")
    );
}

#[derive(Debug)]
struct Denied;

impl ProfileInstaller for Denied {
    fn install(&self, _tag: &mut Compound, _profile: &GameProfile) -> Result<(), ProfileError> {
        Err(ProfileError::Backend {
            source: "access denied".into(),
        })
    }
}

#[test]
fn test_failing_installer_is_reported() {
    let err = ItemBuilder::skull_from(tagged(ItemKind::PlayerHead))
        .unwrap()
        .texture_with(&Denied, encode_skin_url("http://textures.minecraft.net/texture/x"))
        .unwrap_err();

    assert!(matches!(err, Error::SetupFailure { .. }));
    assert_eq!(err.into_item(), None);
}

#[test]
fn test_invalid_texture_is_setup_failure() {
    let err = ItemBuilder::skull().texture("not base64!").unwrap_err();
    assert!(matches!(err, Error::SetupFailure {
        source: ProfileError::InvalidBase64 { .. }
    }));
}

proptest! {
    #[test]
    fn name_is_last_write(first in "[a-zA-Z0-9 ]{0,24}", second in "[a-zA-Z0-9 ]{0,24}") {
        let item = ItemBuilder::from_kind(ItemKind::Stone)
            .using(&PLAIN)
            .name(&first)
            .name(&second)
            .build();

        prop_assert_eq!(item.display_name().unwrap().to_plain(), second);
    }

    #[test]
    fn lore_keeps_order(lines in prop::collection::vec("[a-zA-Z0-9 ]{1,16}", 1..8)) {
        let item = ItemBuilder::from_kind(ItemKind::Paper)
            .using(&PLAIN)
            .lore(&lines)
            .build();

        let stored: Vec<_> = item.lore().iter().map(|line| line.to_plain()).collect();
        prop_assert_eq!(stored, lines);
    }

    #[test]
    fn build_keeps_kind(kind in prop::sample::select(ItemKind::ALL.to_vec())) {
        let item = ItemBuilder::from_kind(kind)
            .name("Anything")
            .lore(["line"])
            .glow(true)
            .build();

        prop_assert_eq!(item.item, kind);
        prop_assert_eq!(item.category(), Category::of(kind));
    }
}
