//! Armor class and weapon attack resolution.

use serde::Serialize;

use charforge_domain::{
    Attribute, ArmorStats, Character, DiceFormula, DomainError, RuleBook, WeaponStats,
};

use crate::derived::base_attack_bonus;
use crate::error::BuildError;

/// Bonus a shield adds to both armor class values.
pub const SHIELD_BONUS: i32 = 1;
/// Armor class of an unarmored character before dexterity.
pub const UNARMORED_AC: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmorClass {
    pub melee: i32,
    pub ranged: i32,
}

impl ArmorClass {
    fn from_stats(stats: &ArmorStats, shield: bool) -> Self {
        let bonus = if shield { SHIELD_BONUS } else { 0 };
        Self {
            melee: stats.melee_ac + bonus,
            ranged: stats.ranged_ac + bonus,
        }
    }
}

/// A resolved weapon: total attack bonus and the damage roll with its modifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponAttack {
    pub name: String,
    pub attack_bonus: i32,
    pub damage: DiceFormula,
}

/// Armor class pair for a named armor table entry, with or without a shield.
pub fn calculate_ac(rules: &RuleBook, armor: &str, shield: bool) -> Result<ArmorClass, BuildError> {
    let record = rules
        .armor(armor)
        .ok_or_else(|| BuildError::unknown("armor", armor))?;
    Ok(ArmorClass::from_stats(&record.stats, shield))
}

/// The character's armor class: best worn armor, shield, then dexterity.
pub fn character_armor_class(character: &Character) -> ArmorClass {
    let unarmored = ArmorStats {
        melee_ac: UNARMORED_AC,
        ranged_ac: UNARMORED_AC,
        soak: 0,
        trauma_modifier: 0,
    };
    let best = character
        .worn_armor()
        .max_by_key(|a| (a.melee_ac, a.ranged_ac))
        .unwrap_or(&unarmored);

    let dex = character.attributes.modifier(Attribute::Dexterity);
    let base = ArmorClass::from_stats(best, character.has_shield());
    ArmorClass {
        melee: base.melee + dex,
        ranged: base.ranged + dex,
    }
}

/// Resolve an attack with a carried weapon or a weapon from the rule tables.
///
/// Attack bonus is base attack bonus plus the best governing attribute
/// modifier plus the skill's check level (-2 when untrained).
pub fn resolve_weapon(
    character: &Character,
    rules: &RuleBook,
    weapon: &str,
) -> Result<WeaponAttack, BuildError> {
    let stats: &WeaponStats = character
        .inventory
        .iter()
        .filter(|item| item.name == weapon)
        .find_map(|item| item.weapon.as_ref())
        .or_else(|| rules.weapon(weapon).map(|record| &record.stats))
        .ok_or_else(|| BuildError::unknown("weapon", weapon))?;

    let attribute_mod = character
        .attributes
        .best_modifier(&stats.attributes)
        .unwrap_or(0);
    let attack_bonus =
        base_attack_bonus(character) + attribute_mod + character.skill_check_level(&stats.skill);
    let damage = DiceFormula::parse(&stats.damage)
        .map_err(DomainError::from)?
        .with_bonus(attribute_mod);

    Ok(WeaponAttack {
        name: weapon.to_string(),
        attack_bonus,
        damage,
    })
}
