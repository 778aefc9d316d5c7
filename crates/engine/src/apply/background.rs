use serde::Serialize;

use charforge_domain::value_objects::{ANY_COMBAT, ANY_SKILL};
use charforge_domain::{Character, RuleBook, SkillFilter};

use super::grant_skill_or_redirect;
use crate::error::BuildError;
use crate::pending::{PendingItem, Resolution};

/// Growth rolls a background allows.
pub const GROWTH_PICKS: u8 = 1;
/// Learning rolls a background allows.
pub const LEARNING_PICKS: u8 = 2;

/// Result of applying a background.
///
/// The caller drives the growth and learning rolls; the tables and pick counts
/// are handed back for that loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundOutcome {
    pub resolution: Resolution,
    pub growth: Vec<String>,
    pub learning: Vec<String>,
    pub growth_picks: u8,
    pub learning_picks: u8,
}

/// Apply a background, matched case-insensitively by name.
///
/// Re-applying replaces the recorded background.
pub fn apply_background(
    character: &mut Character,
    rules: &RuleBook,
    name: &str,
) -> Result<BackgroundOutcome, BuildError> {
    let background = rules
        .background(name)
        .ok_or_else(|| BuildError::unknown("background", name))?;

    character.background = Some(background.name.clone());

    let free_skill = background.free_skill.as_str();
    let pending: Vec<PendingItem> = match free_skill {
        ANY_COMBAT | ANY_SKILL => {
            let category = if free_skill == ANY_COMBAT {
                SkillFilter::Combat
            } else {
                SkillFilter::Any
            };
            vec![PendingItem::PickSkill {
                category,
                options: Vec::new(),
                reason: Some(format!(
                    "{} background grants a free {} skill",
                    background.name, category
                )),
            }]
        }
        skill => grant_skill_or_redirect(character, &background.name, skill)?
            .into_iter()
            .collect(),
    };

    tracing::info!(
        background = %background.name,
        pending = pending.len(),
        "Applied background"
    );

    Ok(BackgroundOutcome {
        resolution: Resolution::from_pending(pending),
        growth: background.growth.clone(),
        learning: background.learning.clone(),
        growth_picks: GROWTH_PICKS,
        learning_picks: LEARNING_PICKS,
    })
}
