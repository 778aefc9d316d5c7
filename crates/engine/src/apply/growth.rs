//! Growth and learning roll resolution.
//!
//! Growth entries are strings whose shape decides how they resolve:
//! "+1 Physical, +1 Mental" raises one stat of each category, "+N Physical",
//! "+N Mental" or "+N Any Stat" raises one stat (or splits +2 across two), and
//! anything else names a skill. Skill results never redirect here; a capped
//! skill is an error and the caller is expected to offer another pick first.

use std::fmt;
use std::sync::LazyLock;

use rand::Rng;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use charforge_domain::value_objects::{is_combat_skill, ANY_COMBAT, ANY_SKILL};
use charforge_domain::{roll_die, Attribute, AttributeCategory, BackgroundRecord, Character};

use crate::error::BuildError;
use crate::skill_ledger;

static COMPOUND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\+(\d+)\s+physical\s*,\s*\+(\d+)\s+mental$").expect("valid regex")
});
static STAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\+(\d+)\s+(physical|mental|any stat)$").expect("valid regex")
});

const GROWTH_DIE: u8 = 6;
const LEARNING_DIE: u8 = 8;

/// Which attributes a numeric growth entry may raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatScope {
    Category(AttributeCategory),
    Any,
}

impl StatScope {
    pub fn admits(&self, attribute: Attribute) -> bool {
        match self {
            Self::Category(category) => attribute.category() == *category,
            Self::Any => true,
        }
    }
}

impl fmt::Display for StatScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category(category) => fmt::Display::fmt(category, f),
            Self::Any => f.write_str("any"),
        }
    }
}

/// A parsed growth-table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrowthEntry {
    Compound { physical: i32, mental: i32 },
    Stat { amount: i32, scope: StatScope },
    Skill(String),
}

/// Caller answers for a growth roll. Which fields are needed depends on the entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthChoices {
    #[serde(default)]
    pub stat: Option<Attribute>,
    #[serde(default)]
    pub split: Option<[Attribute; 2]>,
    #[serde(default)]
    pub physical: Option<Attribute>,
    #[serde(default)]
    pub mental: Option<Attribute>,
    #[serde(default)]
    pub skill: Option<String>,
}

impl GrowthChoices {
    pub fn stat(attribute: Attribute) -> Self {
        Self {
            stat: Some(attribute),
            ..Self::default()
        }
    }

    pub fn split(first: Attribute, second: Attribute) -> Self {
        Self {
            split: Some([first, second]),
            ..Self::default()
        }
    }

    pub fn compound(physical: Attribute, mental: Attribute) -> Self {
        Self {
            physical: Some(physical),
            mental: Some(mental),
            ..Self::default()
        }
    }

    pub fn skill(skill: impl Into<String>) -> Self {
        Self {
            skill: Some(skill.into()),
            ..Self::default()
        }
    }
}

/// Parse a growth-table entry into the shape that decides its resolution.
pub fn parse_growth_entry(entry: &str) -> Result<GrowthEntry, BuildError> {
    let entry = entry.trim();
    if let Some(caps) = COMPOUND_RE.captures(entry) {
        let physical = parse_amount(entry, &caps[1])?;
        let mental = parse_amount(entry, &caps[2])?;
        return Ok(GrowthEntry::Compound { physical, mental });
    }
    if let Some(caps) = STAT_RE.captures(entry) {
        let amount = parse_amount(entry, &caps[1])?;
        let scope = match caps[2].to_lowercase().as_str() {
            "physical" => StatScope::Category(AttributeCategory::Physical),
            "mental" => StatScope::Category(AttributeCategory::Mental),
            _ => StatScope::Any,
        };
        return Ok(GrowthEntry::Stat { amount, scope });
    }
    Ok(GrowthEntry::Skill(entry.to_string()))
}

fn parse_amount(entry: &str, digits: &str) -> Result<i32, BuildError> {
    digits
        .parse()
        .map_err(|_| BuildError::invalid_option(entry, "attribute increase is out of range"))
}

/// Roll 1d6 on the background's growth table.
pub fn roll_growth<R: Rng + ?Sized>(
    background: &BackgroundRecord,
    rng: &mut R,
) -> Result<(u8, String), BuildError> {
    roll_on(&background.name, &background.growth, GROWTH_DIE, rng)
}

/// Roll 1d8 on the background's learning table.
pub fn roll_learning<R: Rng + ?Sized>(
    background: &BackgroundRecord,
    rng: &mut R,
) -> Result<(u8, String), BuildError> {
    roll_on(&background.name, &background.learning, LEARNING_DIE, rng)
}

fn roll_on<R: Rng + ?Sized>(
    background: &str,
    table: &[String],
    die: u8,
    rng: &mut R,
) -> Result<(u8, String), BuildError> {
    let face = roll_die(rng, die) as u8;
    let entry = table.get(usize::from(face) - 1).cloned().ok_or_else(|| {
        BuildError::invalid_option(
            face.to_string(),
            format!("{} table has no entry for this roll", background),
        )
    })?;
    tracing::debug!(background = %background, face, entry = %entry, "Rolled on table");
    Ok((face, entry))
}

/// Apply the outcome of one growth roll.
pub fn resolve_growth_roll(
    character: &mut Character,
    entry: &str,
    choices: &GrowthChoices,
) -> Result<(), BuildError> {
    match parse_growth_entry(entry)? {
        GrowthEntry::Compound { physical, mental } => {
            let (Some(p), Some(m)) = (choices.physical, choices.mental) else {
                return Err(BuildError::invalid_option(
                    entry,
                    "needs both a physical and a mental attribute",
                ));
            };
            require_scope(p, StatScope::Category(AttributeCategory::Physical))?;
            require_scope(m, StatScope::Category(AttributeCategory::Mental))?;
            raise(character, p, physical);
            raise(character, m, mental);
        }
        GrowthEntry::Stat { amount, scope } => {
            if let Some([first, second]) = choices.split {
                if amount != 2 {
                    return Err(BuildError::invalid_option(
                        entry,
                        "only a +2 entry can be split",
                    ));
                }
                if first == second {
                    return Err(BuildError::duplicate("attribute", first.name()));
                }
                require_scope(first, scope)?;
                require_scope(second, scope)?;
                raise(character, first, 1);
                raise(character, second, 1);
            } else {
                let Some(stat) = choices.stat else {
                    return Err(BuildError::invalid_option(
                        entry,
                        "needs a target attribute or a split",
                    ));
                };
                require_scope(stat, scope)?;
                raise(character, stat, amount);
            }
        }
        GrowthEntry::Skill(skill) => {
            let skill = match (skill.as_str(), choices.skill.as_deref()) {
                (ANY_SKILL, Some(chosen)) => chosen.to_string(),
                (ANY_COMBAT, Some(chosen)) => {
                    if !is_combat_skill(chosen) {
                        return Err(BuildError::invalid_category(chosen, "combat"));
                    }
                    chosen.to_string()
                }
                (ANY_SKILL | ANY_COMBAT, None) => {
                    return Err(BuildError::invalid_option(entry, "needs a chosen skill"));
                }
                (_, Some(chosen)) => chosen.to_string(),
                (literal, None) => literal.to_string(),
            };
            skill_ledger::add_bonus(character, &skill)?;
        }
    }
    tracing::debug!(entry = %entry, "Resolved growth roll");
    Ok(())
}

/// Apply one learning pick. The skill must be concrete and below the cap.
pub fn resolve_learning_pick(character: &mut Character, skill: &str) -> Result<u8, BuildError> {
    if skill == ANY_SKILL || skill == ANY_COMBAT {
        return Err(BuildError::invalid_option(skill, "name a concrete skill"));
    }
    let level = skill_ledger::add_bonus(character, skill)?;
    tracing::debug!(skill = %skill, level, "Resolved learning pick");
    Ok(level)
}

fn require_scope(attribute: Attribute, scope: StatScope) -> Result<(), BuildError> {
    if scope.admits(attribute) {
        Ok(())
    } else {
        Err(BuildError::invalid_category(attribute.name(), scope))
    }
}

fn raise(character: &mut Character, attribute: Attribute, amount: i32) {
    let score = character.attributes.raise(attribute, amount);
    tracing::debug!(attribute = %attribute, score, "Raised attribute");
}
