//! Fluent builders over an [`ItemStack`].
//!
//! One builder type serves every category; the category is a type parameter
//! so banner, book, firework, map and skull operations only exist on the
//! builders that may use them.

use std::marker::PhantomData;

use cobalt_text::Text;
use snafu::ensure;
use tracing::{debug, trace, warn};
use valence_protocol::{
    ItemKind, ItemStack,
    nbt::{Compound, Value},
};

use crate::{
    Banner, Book, CategoryTag, Enchantment, Firework, Generic, ItemFlag, Map, Rgb, Skull,
    error::{
        InvalidAmountSnafu, InvalidDurabilitySnafu, InvalidLevelSnafu, Result, TypeMismatchSnafu,
        UnsupportedSnafu,
    },
    flag,
    strategy::{LEGACY, NameLoreStrategy},
    tag,
};

pub mod banner;
pub mod book;
pub mod firework;
pub mod map;
pub mod skull;

pub type BannerBuilder<'a> = ItemBuilder<'a, Banner>;
pub type BookBuilder<'a> = ItemBuilder<'a, Book>;
pub type FireworkBuilder<'a> = ItemBuilder<'a, Firework>;
pub type MapBuilder<'a> = ItemBuilder<'a, Map>;
pub type SkullBuilder<'a> = ItemBuilder<'a, Skull>;

pub(crate) const HIDE_FLAGS: &str = "HideFlags";
pub(crate) const UNBREAKABLE: &str = "Unbreakable";
pub(crate) const CUSTOM_MODEL_DATA: &str = "CustomModelData";
pub(crate) const DAMAGE: &str = "Damage";

/// Levels are stored as shorts.
const MAX_STORED_LEVEL: u16 = i16::MAX.unsigned_abs();

/// A builder for decorating a single item stack.
///
/// The stack is owned by the builder until [`ItemBuilder::build`] hands it
/// back; it is edited in place and never copied.
#[derive(Clone, Debug)]
#[must_use]
pub struct ItemBuilder<'a, C = Generic> {
    stack: ItemStack,
    strategy: &'a dyn NameLoreStrategy,
    category: PhantomData<C>,
}

impl ItemBuilder<'static, Generic> {
    /// A fresh single item of `kind`.
    pub fn from_kind(kind: ItemKind) -> Self {
        Self::assemble(ItemStack::new(kind, 1, None), &LEGACY)
    }

    /// Edits an existing stack of any kind.
    pub fn from_stack(stack: ItemStack) -> Self {
        Self::assemble(stack, &LEGACY)
    }

    pub fn banner() -> BannerBuilder<'static> {
        ItemBuilder::assemble(ItemStack::new(ItemKind::WhiteBanner, 1, None), &LEGACY)
    }

    pub fn banner_from(stack: ItemStack) -> Result<BannerBuilder<'static>> {
        ItemBuilder::with_strategy(stack, &LEGACY)
    }

    pub fn written_book() -> BookBuilder<'static> {
        ItemBuilder::assemble(ItemStack::new(ItemKind::WrittenBook, 1, None), &LEGACY)
    }

    pub fn writable_book() -> BookBuilder<'static> {
        ItemBuilder::assemble(ItemStack::new(ItemKind::WritableBook, 1, None), &LEGACY)
    }

    pub fn book_from(stack: ItemStack) -> Result<BookBuilder<'static>> {
        ItemBuilder::with_strategy(stack, &LEGACY)
    }

    pub fn firework() -> FireworkBuilder<'static> {
        ItemBuilder::assemble(ItemStack::new(ItemKind::FireworkRocket, 1, None), &LEGACY)
    }

    pub fn firework_from(stack: ItemStack) -> Result<FireworkBuilder<'static>> {
        ItemBuilder::with_strategy(stack, &LEGACY)
    }

    pub fn star() -> FireworkBuilder<'static> {
        ItemBuilder::assemble(ItemStack::new(ItemKind::FireworkStar, 1, None), &LEGACY)
    }

    pub fn star_from(stack: ItemStack) -> Result<FireworkBuilder<'static>> {
        ensure!(stack.item == ItemKind::FireworkStar, TypeMismatchSnafu {
            expected: Firework::CATEGORY,
            item: Box::new(stack),
        });
        Ok(ItemBuilder::assemble(stack, &LEGACY))
    }

    pub fn map() -> MapBuilder<'static> {
        ItemBuilder::assemble(ItemStack::new(ItemKind::FilledMap, 1, None), &LEGACY)
    }

    pub fn map_from(stack: ItemStack) -> Result<MapBuilder<'static>> {
        ItemBuilder::with_strategy(stack, &LEGACY)
    }

    pub fn skull() -> SkullBuilder<'static> {
        ItemBuilder::assemble(ItemStack::new(ItemKind::PlayerHead, 1, None), &LEGACY)
    }

    pub fn skull_from(stack: ItemStack) -> Result<SkullBuilder<'static>> {
        ItemBuilder::with_strategy(stack, &LEGACY)
    }
}

impl<'a, C: CategoryTag> ItemBuilder<'a, C> {
    /// Wraps `stack` after checking its kind belongs to category `C`.
    ///
    /// On mismatch the stack comes back untouched inside
    /// [`crate::Error::TypeMismatch`].
    pub fn with_strategy(stack: ItemStack, strategy: &'a dyn NameLoreStrategy) -> Result<Self> {
        if !C::accepts(stack.item) {
            return TypeMismatchSnafu {
                expected: C::CATEGORY,
                item: Box::new(stack),
            }
            .fail();
        }

        Ok(Self::assemble(stack, strategy))
    }

    fn assemble(stack: ItemStack, strategy: &'a dyn NameLoreStrategy) -> Self {
        let category = C::CATEGORY;
        debug!(kind = ?stack.item, %category, "item builder created");
        Self {
            stack,
            strategy,
            category: PhantomData,
        }
    }

    /// Swaps the text strategy for the rest of the chain.
    pub fn using<'b>(self, strategy: &'b dyn NameLoreStrategy) -> ItemBuilder<'b, C> {
        ItemBuilder {
            stack: self.stack,
            strategy,
            category: PhantomData,
        }
    }

    /// Moves to the builder of another category, checking the kind.
    pub fn specialize<D: CategoryTag>(self) -> Result<ItemBuilder<'a, D>> {
        ItemBuilder::with_strategy(self.stack, self.strategy)
    }

    /// Drops the category-specific operations.
    pub fn generalize(self) -> ItemBuilder<'a, Generic> {
        ItemBuilder {
            stack: self.stack,
            strategy: self.strategy,
            category: PhantomData,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ItemKind {
        self.stack.item
    }

    #[must_use]
    pub const fn stack(&self) -> &ItemStack {
        &self.stack
    }

    #[must_use]
    pub fn strategy(&self) -> &'a dyn NameLoreStrategy {
        self.strategy
    }

    fn tag(&mut self) -> &mut Compound {
        self.stack.nbt.get_or_insert_with(Compound::new)
    }

    fn edit(mut self, f: impl FnOnce(&mut Compound)) -> Self {
        f(self.tag());
        self
    }

    fn edit_display(self, f: impl FnOnce(&mut Compound)) -> Self {
        self.edit(|root| tag::with_compound(root, tag::DISPLAY, f))
    }

    /// Sets the display name, formatted by the builder's strategy.
    pub fn name(self, name: impl AsRef<str>) -> Self {
        let text = self.strategy.name(name.as_ref());
        self.name_text(text)
    }

    /// Sets an already built component as the display name.
    pub fn name_text(self, name: Text<'_>) -> Self {
        let json = name.to_json();
        trace!(kind = ?self.stack.item, %json, "setting display name");

        self.edit_display(|display| {
            display.insert(tag::NAME, Value::String(json));
        })
    }

    /// Replaces the lore, formatting each line with the builder's strategy.
    pub fn lore<I>(self, lines: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let strategy = self.strategy;
        let lines: Vec<_> = lines
            .into_iter()
            .map(|line| strategy.lore_line(line.as_ref()))
            .collect();

        self.lore_text(lines)
    }

    /// Replaces the lore with already built components. An empty iterator
    /// removes the lore.
    pub fn lore_text<'t>(self, lines: impl IntoIterator<Item = Text<'t>>) -> Self {
        let lines: Vec<String> = lines.into_iter().map(|line| line.to_json()).collect();
        trace!(kind = ?self.stack.item, lines = lines.len(), "setting lore");

        self.edit_display(|display| tag::put_strings(display, tag::LORE, lines))
    }

    /// Edits the current lore in place.
    ///
    /// Stored lines that are not valid JSON text are kept as plain text.
    pub fn edit_lore(self, f: impl FnOnce(&mut Vec<Text<'static>>)) -> Self {
        self.edit_display(|display| {
            let mut lines: Vec<_> = tag::take_strings(display, tag::LORE)
                .into_iter()
                .map(|raw| {
                    Text::from_json(&raw).unwrap_or_else(|err| {
                        warn!(%err, %raw, "stored lore line is not JSON text");
                        Text::from(raw)
                    })
                })
                .collect();

            f(&mut lines);

            let lines = lines.iter().map(Text::to_json).collect();
            tag::put_strings(display, tag::LORE, lines);
        })
    }

    /// Adds or overwrites an enchantment, within the survival level range.
    pub fn enchant(self, enchantment: Enchantment, level: u16) -> Result<Self> {
        let max = enchantment.max_level();
        ensure!((1..=max).contains(&level), InvalidLevelSnafu {
            enchantment,
            level,
            max
        });

        Ok(self.write_enchantment(enchantment, level))
    }

    /// Like [`Self::enchant`] but allows any level that fits in the tag.
    pub fn enchant_unsafe(self, enchantment: Enchantment, level: u16) -> Result<Self> {
        ensure!((1..=MAX_STORED_LEVEL).contains(&level), InvalidLevelSnafu {
            enchantment,
            level,
            max: MAX_STORED_LEVEL,
        });

        Ok(self.write_enchantment(enchantment, level))
    }

    pub fn enchants(self, enchantments: impl IntoIterator<Item = (Enchantment, u16)>) -> Result<Self> {
        enchantments
            .into_iter()
            .try_fold(self, |builder, (enchantment, level)| {
                builder.enchant(enchantment, level)
            })
    }

    pub fn disenchant(self, enchantment: Enchantment) -> Self {
        let key = enchantment_key(self.stack.item);
        self.edit(|root| {
            let mut list = tag::take_compounds(root, key);
            list.retain(|entry| stored_enchantment(entry) != Some(enchantment));
            tag::put_compounds(root, key, list);
        })
    }

    fn write_enchantment(self, enchantment: Enchantment, level: u16) -> Self {
        let key = enchantment_key(self.stack.item);
        let level = i16::try_from(level).unwrap_or(i16::MAX);
        trace!(?enchantment, level, "writing enchantment");

        self.edit(|root| {
            let mut list = tag::take_compounds(root, key);

            match list
                .iter_mut()
                .find(|entry| stored_enchantment(entry) == Some(enchantment))
            {
                Some(entry) => {
                    entry.insert("lvl", Value::Short(level));
                }
                None => {
                    let mut entry = Compound::new();
                    entry.insert("id", Value::String(enchantment.ident()));
                    entry.insert("lvl", Value::Short(level));
                    list.push(entry);
                }
            }

            tag::put_compounds(root, key, list);
        })
    }

    /// Hides the given tooltip sections, keeping the ones already hidden.
    pub fn flags(self, flags: impl IntoIterator<Item = ItemFlag>) -> Self {
        self.edit(|root| {
            let current = flag::from_hide_flags(tag::int(root, HIDE_FLAGS).unwrap_or_default());
            let updated = flags.into_iter().fold(current, |set, flag| set | flag);
            write_hide_flags(root, updated);
        })
    }

    pub fn remove_flags(self, flags: impl IntoIterator<Item = ItemFlag>) -> Self {
        self.edit(|root| {
            let current = flag::from_hide_flags(tag::int(root, HIDE_FLAGS).unwrap_or_default());
            let updated = flags.into_iter().fold(current, |set, flag| set - flag);
            write_hide_flags(root, updated);
        })
    }

    pub fn unbreakable(self, unbreakable: bool) -> Self {
        self.edit(|root| {
            if unbreakable {
                tag::put_flag(root, UNBREAKABLE, true);
            } else {
                root.remove(UNBREAKABLE);
            }
        })
    }

    /// Adds the enchantment glint without a visible enchantment: lure I with
    /// enchantments hidden.
    ///
    /// `false` only removes that exact pair. A lure of another level or a
    /// `HideEnchantments` flag on its own is left as it is.
    pub fn glow(self, glow: bool) -> Self {
        let lure = self.lure_level();

        if glow {
            let builder = if lure.is_some() {
                self
            } else {
                self.write_enchantment(Enchantment::Lure, 1)
            };

            return builder.flags([ItemFlag::HideEnchantments]);
        }

        let hidden = self
            .stack
            .nbt
            .as_ref()
            .and_then(|root| tag::int(root, HIDE_FLAGS))
            .is_some_and(|bits| flag::from_hide_flags(bits).contains(ItemFlag::HideEnchantments));

        if lure == Some(1) && hidden {
            self.disenchant(Enchantment::Lure)
                .remove_flags([ItemFlag::HideEnchantments])
        } else {
            self
        }
    }

    fn lure_level(&self) -> Option<i32> {
        let root = self.stack.nbt.as_ref()?;
        tag::compounds(root, enchantment_key(self.stack.item))
            .iter()
            .find(|entry| stored_enchantment(entry) == Some(Enchantment::Lure))
            .and_then(|entry| tag::int(entry, "lvl"))
    }

    /// Sets `CustomModelData`, used by resource packs to pick a model.
    pub fn model(self, data: i32) -> Self {
        self.edit(|root| {
            root.insert(CUSTOM_MODEL_DATA, Value::Int(data));
        })
    }

    /// Sets how much durability has been used up.
    pub fn durability(self, damage: u16) -> Result<Self> {
        let kind = self.stack.item;
        let max = kind.max_durability();

        ensure!(max > 0, UnsupportedSnafu {
            operation: "durability",
            kind
        });
        ensure!(damage <= max, InvalidDurabilitySnafu { kind, damage, max });

        Ok(self.edit(|root| {
            root.insert(DAMAGE, Value::Int(i32::from(damage)));
        }))
    }

    pub fn amount(mut self, count: i8) -> Result<Self> {
        let kind = self.stack.item;
        let max = kind.max_stack();

        ensure!((1..=max).contains(&count), InvalidAmountSnafu { kind, count, max });

        self.stack.count = count;
        Ok(self)
    }

    /// Writes a raw tag, for data no dedicated operation covers.
    pub fn nbt(self, key: &str, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.edit(|root| {
            root.insert(key, value);
        })
    }

    pub fn remove_nbt(self, key: &str) -> Self {
        self.edit(|root| {
            root.remove(key);
        })
    }

    /// Finishes the chain and hands the stack back.
    #[must_use]
    pub fn build(mut self) -> ItemStack {
        if self.stack.nbt.as_ref().is_some_and(Compound::is_empty) {
            self.stack.nbt = None;
        }

        debug!(kind = ?self.stack.item, count = self.stack.count, "item built");
        self.stack
    }
}

impl ItemBuilder<'_, Generic> {
    /// Dyes leather armor or tints a potion.
    pub fn color(self, color: Rgb) -> Result<Self> {
        let kind = self.stack.item;

        match kind {
            ItemKind::LeatherHelmet
            | ItemKind::LeatherChestplate
            | ItemKind::LeatherLeggings
            | ItemKind::LeatherBoots
            | ItemKind::LeatherHorseArmor => Ok(self.edit_display(|display| {
                display.insert("color", Value::Int(color.to_nbt()));
            })),
            ItemKind::Potion
            | ItemKind::SplashPotion
            | ItemKind::LingeringPotion
            | ItemKind::TippedArrow => Ok(self.edit(|root| {
                root.insert("CustomPotionColor", Value::Int(color.to_nbt()));
            })),
            _ => UnsupportedSnafu {
                operation: "color",
                kind,
            }
            .fail(),
        }
    }
}

impl<C: CategoryTag> From<ItemBuilder<'_, C>> for ItemStack {
    fn from(builder: ItemBuilder<'_, C>) -> Self {
        builder.build()
    }
}

/// Enchanted books keep their enchantments separate from the book's own.
pub(crate) const fn enchantment_key(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::EnchantedBook => "StoredEnchantments",
        _ => "Enchantments",
    }
}

pub(crate) fn stored_enchantment(entry: &Compound) -> Option<Enchantment> {
    tag::string(entry, "id").and_then(Enchantment::from_ident)
}

fn write_hide_flags(root: &mut Compound, flags: enumset::EnumSet<ItemFlag>) {
    if flags.is_empty() {
        root.remove(HIDE_FLAGS);
    } else {
        root.insert(HIDE_FLAGS, Value::Int(flag::to_hide_flags(flags)));
    }
}
