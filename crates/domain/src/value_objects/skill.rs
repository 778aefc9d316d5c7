//! Skill vocabulary: the fixed skill list, combat subset and choice filters.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest level a skill can reach during creation.
pub const MAX_SKILL_LEVEL: u8 = 1;
/// Effective check level of a skill the character has never trained.
pub const UNTRAINED_LEVEL: i32 = -2;

/// Rule-data sentinel for "pick any skill".
pub const ANY_SKILL: &str = "Any Skill";
/// Rule-data sentinel for "pick any combat skill".
pub const ANY_COMBAT: &str = "Any Combat";

pub const ALL_SKILLS: [&str; 19] = [
    "Administer",
    "Connect",
    "Drive",
    "Exert",
    "Fix",
    "Heal",
    "Know",
    "Lead",
    "Notice",
    "Perform",
    "Program",
    "Punch",
    "Shoot",
    "Sneak",
    "Stab",
    "Survive",
    "Talk",
    "Trade",
    "Work",
];

pub const COMBAT_SKILLS: [&str; 3] = ["Punch", "Shoot", "Stab"];

pub fn is_known_skill(name: &str) -> bool {
    ALL_SKILLS.contains(&name)
}

pub fn is_combat_skill(name: &str) -> bool {
    COMBAT_SKILLS.contains(&name)
}

/// Which skills a choice may land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkillFilter {
    #[default]
    Any,
    Combat,
    NonCombat,
}

impl SkillFilter {
    pub fn admits(&self, skill: &str) -> bool {
        match self {
            Self::Any => is_known_skill(skill),
            Self::Combat => is_combat_skill(skill),
            Self::NonCombat => is_known_skill(skill) && !is_combat_skill(skill),
        }
    }

    /// Skills this filter admits, in list order.
    pub fn skills(&self) -> impl Iterator<Item = &'static str> + '_ {
        ALL_SKILLS.into_iter().filter(move |s| self.admits(s))
    }
}

impl fmt::Display for SkillFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Combat => f.write_str("combat"),
            Self::NonCombat => f.write_str("non-combat"),
        }
    }
}
