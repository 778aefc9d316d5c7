//! Starting gear and prerequisite-gated specialty items.

use charforge_domain::{Character, InventoryItem, ItemKind, Prerequisite, RuleBook, SpecialtyItem};

use crate::error::BuildError;

/// Add every item of a starting kit to the inventory. Returns the number added.
///
/// Kit entries name weapons, armor or shields from the rule tables; anything
/// else is carried as plain gear.
pub fn equip_kit(
    character: &mut Character,
    rules: &RuleBook,
    kit: &str,
) -> Result<usize, BuildError> {
    let kit = rules
        .kit(kit)
        .ok_or_else(|| BuildError::unknown("gear kit", kit))?;

    let items: Vec<InventoryItem> = kit.items.iter().map(|name| stock_item(rules, name)).collect();
    let added = items.len();
    character.inventory.extend(items);

    tracing::info!(kit = %kit.name, items = added, "Equipped gear kit");
    Ok(added)
}

fn stock_item(rules: &RuleBook, name: &str) -> InventoryItem {
    let mut item = InventoryItem {
        name: name.to_string(),
        kind: ItemKind::Gear,
        specialty: false,
        armor: None,
        weapon: None,
    };
    if let Some(weapon) = rules.weapon(name) {
        item.kind = ItemKind::Weapon;
        item.weapon = Some(weapon.stats.clone());
    } else if let Some(armor) = rules.armor(name) {
        item.kind = ItemKind::Armor;
        item.armor = Some(armor.stats);
    } else if rules.is_shield(name) {
        item.kind = ItemKind::Shield;
    }
    item
}

pub fn prerequisite_met(character: &Character, prerequisite: &Prerequisite) -> bool {
    match prerequisite {
        Prerequisite::Edge { edge } => character.has_edge(edge),
        Prerequisite::Focus { focus } => character.has_focus(focus),
        Prerequisite::Skill { skill, level } => {
            character.skill_level(skill).is_some_and(|have| have >= *level)
        }
    }
}

/// Specialty items whose prerequisite the character meets and does not carry yet.
pub fn eligible_specialty_items<'a>(
    character: &Character,
    rules: &'a RuleBook,
) -> Vec<&'a SpecialtyItem> {
    rules
        .specialty_items()
        .iter()
        .filter(|item| prerequisite_met(character, &item.requires))
        .filter(|item| !carries(character, &item.name))
        .collect()
}

/// Add a specialty item after checking its prerequisite.
pub fn equip_specialty(
    character: &mut Character,
    rules: &RuleBook,
    name: &str,
) -> Result<(), BuildError> {
    let item = rules
        .specialty_item(name)
        .ok_or_else(|| BuildError::unknown("specialty item", name))?;
    if !prerequisite_met(character, &item.requires) {
        return Err(BuildError::PrerequisiteUnmet {
            item: item.name.clone(),
            requirement: item.requires.to_string(),
        });
    }
    if carries(character, &item.name) {
        return Err(BuildError::duplicate("specialty item", &item.name));
    }

    character.inventory.push(InventoryItem {
        name: item.name.clone(),
        kind: item.kind,
        specialty: true,
        armor: item.armor,
        weapon: item.weapon.clone(),
    });
    tracing::info!(item = %item.name, "Equipped specialty item");
    Ok(())
}

fn carries(character: &Character, name: &str) -> bool {
    character.inventory.iter().any(|i| i.name == name)
}
