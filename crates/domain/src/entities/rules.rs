//! Rule-table records: edges, foci, backgrounds, cyberware and gear.
//!
//! Records are read-only once loaded. Edges and foci describe their creation
//! effects as a list of [`Grant`] descriptors that the engine interprets, so a
//! new edge is a data change rather than a code change.

use serde::{Deserialize, Serialize};

use crate::value_objects::{Attribute, SkillFilter};

/// One creation-time effect of an edge or focus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Grant {
    /// Train a named skill; redirected to a free pick if it is already capped
    Skill { skill: String },
    /// Ask the player for a skill
    SkillChoice {
        #[serde(default)]
        category: SkillFilter,
        #[serde(default)]
        options: Vec<String>,
    },
    /// Add a named focus directly
    Focus {
        focus: String,
        #[serde(default = "default_focus_level")]
        level: u8,
    },
    /// Ask the player for a focus
    FocusChoice {
        #[serde(default)]
        options: Vec<String>,
    },
    /// Ask the player which attribute becomes `target`
    AttributeChoice { target: i32 },
    /// Ask the player to name a contact
    Contact {
        relationship: String,
        #[serde(default)]
        context: String,
    },
    /// Ask the player for a cyberware package
    CyberwarePackageChoice {
        #[serde(default)]
        options: Vec<String>,
    },
}

fn default_focus_level() -> u8 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRecord {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub grants: Vec<Grant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusRecord {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub grants: Vec<Grant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundRecord {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// A skill name, or the "Any Combat" / "Any Skill" sentinel
    pub free_skill: String,
    /// Six entries, indexed by 1d6
    pub growth: Vec<String>,
    /// Eight entries, indexed by 1d8
    pub learning: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CyberwareItem {
    pub name: String,
    /// System strain this item costs
    #[serde(default)]
    pub strain: f32,
    #[serde(default)]
    pub cost: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CyberwarePackage {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub items: Vec<CyberwareItem>,
    /// Point budget for skillplug picks, for packages that carry a skillwire
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skillplug_budget: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    Weapon,
    Armor,
    Shield,
    Gear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmorStats {
    pub melee_ac: i32,
    pub ranged_ac: i32,
    #[serde(default)]
    pub soak: i32,
    #[serde(default)]
    pub trauma_modifier: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponStats {
    /// Damage formula, e.g. "1d8"
    pub damage: String,
    /// Skill used to attack
    pub skill: String,
    /// Attributes whose best modifier applies
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmorRecord {
    pub name: String,
    #[serde(flatten)]
    pub stats: ArmorStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponRecord {
    pub name: String,
    #[serde(flatten)]
    pub stats: WeaponStats,
}

/// A named starting loadout; items refer to weapons, armor or plain gear by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GearKit {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub items: Vec<String>,
}

/// What a character must already have to take a specialty item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Prerequisite {
    Edge { edge: String },
    Focus { focus: String },
    Skill { skill: String, level: u8 },
}

impl std::fmt::Display for Prerequisite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Edge { edge } => write!(f, "edge {}", edge),
            Self::Focus { focus } => write!(f, "focus {}", focus),
            Self::Skill { skill, level } => write!(f, "{}-{}", skill, level),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialtyItem {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub kind: ItemKind,
    pub requires: Prerequisite,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub armor: Option<ArmorStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon: Option<WeaponStats>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grant_descriptors_deserialize_by_type() {
        let grants: Vec<Grant> = serde_json::from_str(
            r#"[
                {"type": "skill", "skill": "Connect"},
                {"type": "skillChoice", "category": "combat"},
                {"type": "focus", "focus": "Connected"},
                {"type": "contact", "relationship": "patron"}
            ]"#,
        )
        .expect("valid grants");

        assert_eq!(
            grants[0],
            Grant::Skill {
                skill: "Connect".to_string()
            }
        );
        assert_eq!(
            grants[1],
            Grant::SkillChoice {
                category: SkillFilter::Combat,
                options: vec![]
            }
        );
        assert_eq!(
            grants[2],
            Grant::Focus {
                focus: "Connected".to_string(),
                level: 1
            }
        );
        assert!(matches!(&grants[3], Grant::Contact { context, .. } if context.is_empty()));
    }

    #[test]
    fn armor_record_flattens_stats() {
        let record: ArmorRecord = serde_json::from_str(
            r#"{"name": "light", "meleeAc": 12, "rangedAc": 14, "soak": 3}"#,
        )
        .expect("valid armor");
        assert_eq!(record.stats.ranged_ac, 14);
        assert_eq!(record.stats.trauma_modifier, 0);
    }

    #[test]
    fn prerequisite_display() {
        let prerequisite = Prerequisite::Skill {
            skill: "Program".to_string(),
            level: 1,
        };
        assert_eq!(prerequisite.to_string(), "Program-1");
    }
}
