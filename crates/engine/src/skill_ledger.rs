//! Skill ledger - the two-level skill cap.
//!
//! The first grant of a skill trains it at level 0, the second promotes it to
//! level 1. A third grant leaves the character untouched and reports that the
//! grant must be redirected to another skill.

use charforge_domain::value_objects::{is_known_skill, MAX_SKILL_LEVEL};
use charforge_domain::Character;

use crate::error::BuildError;

/// Whether a grant of a skill could take effect right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillCheck {
    pub valid: bool,
    pub needs_redirect: bool,
}

/// Outcome of [`add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillGrant {
    Granted { level: u8 },
    NeedsRedirect,
}

pub fn validate(character: &Character, skill: &str) -> SkillCheck {
    if !is_known_skill(skill) {
        return SkillCheck {
            valid: false,
            needs_redirect: false,
        };
    }
    let capped = character
        .skill_level(skill)
        .is_some_and(|level| level >= MAX_SKILL_LEVEL);
    SkillCheck {
        valid: !capped,
        needs_redirect: capped,
    }
}

/// Grant one step of `skill`, or report that it is already capped.
pub fn add(character: &mut Character, skill: &str) -> Result<SkillGrant, BuildError> {
    let check = validate(character, skill);
    if check.needs_redirect {
        tracing::debug!(skill = %skill, "Skill at cap, grant needs redirect");
        return Ok(SkillGrant::NeedsRedirect);
    }
    if !check.valid {
        return Err(BuildError::unknown("skill", skill));
    }

    let level = match character.skill_level(skill) {
        None => 0,
        Some(level) => level + 1,
    };
    character.skills.insert(skill.to_string(), level);
    tracing::debug!(skill = %skill, level, "Granted skill");
    Ok(SkillGrant::Granted { level })
}

/// Grant a skill where no redirect is possible; a capped skill is an error.
pub fn add_bonus(character: &mut Character, skill: &str) -> Result<u8, BuildError> {
    match add(character, skill)? {
        SkillGrant::Granted { level } => Ok(level),
        SkillGrant::NeedsRedirect => Err(BuildError::SkillCapExceeded(skill.to_string())),
    }
}
