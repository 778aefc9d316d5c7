//! Character entity - the record a build session mutates from first roll to finish.
//!
//! # Plain data
//!
//! Every field is serializable plain data with no shared references, so a
//! finished character round-trips through JSON without loss. Rule-table values
//! (cyberware items, armor and weapon profiles) are copied in, never borrowed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::rules::{ArmorStats, CyberwareItem, ItemKind, WeaponStats};
use crate::value_objects::{Attributes, UNTRAINED_LEVEL};

/// A focus the character holds, at level 1 or 2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusEntry {
    pub name: String,
    pub level: u8,
}

/// Someone the character knows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub name: String,
    /// e.g. "friend", "acquaintance", "patron"
    pub relationship: String,
    /// How the character knows them
    #[serde(default)]
    pub context: String,
}

/// The cyberware package installed at creation, with its own copy of the items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledCyberware {
    pub name: String,
    pub items: Vec<CyberwareItem>,
}

/// An item carried by the character.
///
/// Armor and weapon profiles are snapshots taken at equip time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub name: String,
    pub kind: ItemKind,
    /// Granted through a prerequisite-gated specialty pick
    #[serde(default)]
    pub specialty: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub armor: Option<ArmorStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon: Option<WeaponStats>,
}

/// Saving throw targets; lower is better.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingThrows {
    pub physical: i32,
    pub evasion: i32,
    pub mental: i32,
}

/// Combat statistics computed once creation choices are final.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedStats {
    pub hp: i32,
    pub bab: i32,
    pub saving_throws: SavingThrows,
    pub damage_soak: i32,
    pub initiative: i32,
    pub trauma_target: i32,
    pub starting_contact_bonus: i32,
}

/// A player character under construction.
///
/// # Public fields
///
/// Skills, edges and foci are plain collections; the engine's skill ledger and
/// rule application functions are the intended writers. Attributes keep their
/// own invariant (modifier follows score) behind [`Attributes::set_score`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    #[serde(default)]
    pub name: String,
    pub level: u8,
    pub attributes: Attributes,
    /// Skill name to level (0 or 1). Absent means untrained.
    #[serde(default)]
    pub skills: BTreeMap<String, u8>,
    #[serde(default)]
    pub edges: Vec<String>,
    #[serde(default)]
    pub foci: Vec<FocusEntry>,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub cyberware_package: Option<InstalledCyberware>,
    #[serde(default)]
    pub inventory: Vec<InventoryItem>,
    #[serde(flatten)]
    pub derived: DerivedStats,
}

impl Default for Character {
    fn default() -> Self {
        Self::new()
    }
}

impl Character {
    /// A fresh level-1 character with default attributes and nothing chosen.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            level: 1,
            attributes: Attributes::default(),
            skills: BTreeMap::new(),
            edges: Vec::new(),
            foci: Vec::new(),
            background: None,
            contacts: Vec::new(),
            cyberware_package: None,
            inventory: Vec::new(),
            derived: DerivedStats::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Trained level, or `None` when the skill was never granted.
    pub fn skill_level(&self, skill: &str) -> Option<u8> {
        self.skills.get(skill).copied()
    }

    /// Level used for checks: the trained level, or -2 when untrained.
    pub fn skill_check_level(&self, skill: &str) -> i32 {
        self.skill_level(skill)
            .map(i32::from)
            .unwrap_or(UNTRAINED_LEVEL)
    }

    pub fn has_edge(&self, edge: &str) -> bool {
        self.edges.iter().any(|e| e == edge)
    }

    pub fn has_focus(&self, focus: &str) -> bool {
        self.foci.iter().any(|f| f.name == focus)
    }

    pub fn focus_level(&self, focus: &str) -> Option<u8> {
        self.foci.iter().find(|f| f.name == focus).map(|f| f.level)
    }

    /// Armor profiles of everything worn, in inventory order.
    pub fn worn_armor(&self) -> impl Iterator<Item = &ArmorStats> {
        self.inventory.iter().filter_map(|i| i.armor.as_ref())
    }

    pub fn has_shield(&self) -> bool {
        self.inventory.iter().any(|i| i.kind == ItemKind::Shield)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::Attribute;

    #[test]
    fn new_character_is_blank() {
        let character = Character::new();
        assert_eq!(character.level, 1);
        assert!(character.skills.is_empty());
        assert!(character.edges.is_empty());
        assert!(character.background.is_none());
        assert_eq!(character.derived, DerivedStats::default());
    }

    #[test]
    fn untrained_skill_checks_at_minus_two() {
        let mut character = Character::new();
        assert_eq!(character.skill_check_level("Shoot"), -2);
        character.skills.insert("Shoot".to_string(), 0);
        assert_eq!(character.skill_check_level("Shoot"), 0);
    }

    #[test]
    fn json_round_trip_is_lossless() {
        let mut character = Character::new().with_name("Vex");
        character.attributes.set_score(Attribute::Dexterity, 16);
        character.skills.insert("Sneak".to_string(), 1);
        character.edges.push("Ghost".to_string());
        character.foci.push(FocusEntry {
            name: "Assassin".to_string(),
            level: 1,
        });
        character.contacts.push(Contact {
            name: "Marrow".to_string(),
            relationship: "friend".to_string(),
            context: "fence".to_string(),
        });
        character.cyberware_package = Some(InstalledCyberware {
            name: "Infiltrator".to_string(),
            items: vec![CyberwareItem {
                name: "Dermal Chameleon".to_string(),
                strain: 1.0,
                cost: 0,
            }],
        });
        character.derived.hp = 7;

        let json = serde_json::to_string(&character).expect("serializable");
        let restored: Character = serde_json::from_str(&json).expect("deserializable");
        assert_eq!(restored, character);
    }

    #[test]
    fn derived_fields_serialize_flat() {
        let mut character = Character::new();
        character.derived.trauma_target = 6;
        let json = serde_json::to_value(&character).expect("serializable");
        assert_eq!(json["traumaTarget"], 6);
        assert!(json["savingThrows"]["physical"].is_number());
    }
}
