//! Rule application - edges, foci, backgrounds and growth/learning rolls.
//!
//! Edges and foci carry their effects as [`Grant`] descriptors. One executor
//! interprets them: literal grants take effect immediately (or redirect to a
//! pending pick when blocked), choice grants become pending items.

mod background;
mod edges;
mod foci;
mod growth;

pub use background::{apply_background, BackgroundOutcome, GROWTH_PICKS, LEARNING_PICKS};
pub use edges::apply_edge;
pub use foci::{apply_focus, MAX_FOCUS_LEVEL};
pub use growth::{
    parse_growth_entry, resolve_growth_roll, resolve_learning_pick, roll_growth, roll_learning,
    GrowthChoices, GrowthEntry, StatScope,
};

use charforge_domain::value_objects::MAX_SKILL_LEVEL;
use charforge_domain::{Attribute, Character, Grant, RuleBook, SkillFilter};

use crate::error::BuildError;
use crate::pending::PendingItem;
use crate::skill_ledger::{self, SkillGrant};

/// Run `grants` from the rule named `source` against the character.
///
/// Returns the pending items produced, in grant order.
pub(crate) fn execute_grants(
    character: &mut Character,
    rules: &RuleBook,
    source: &str,
    grants: &[Grant],
) -> Result<Vec<PendingItem>, BuildError> {
    let mut pending = Vec::new();

    for grant in grants {
        match grant {
            Grant::Skill { skill } => {
                if let Some(item) = grant_skill_or_redirect(character, source, skill)? {
                    pending.push(item);
                }
            }
            Grant::SkillChoice { category, options } => {
                pending.push(PendingItem::PickSkill {
                    category: *category,
                    options: options.clone(),
                    reason: Some(format!("{} grants a {} skill", source, category)),
                });
            }
            Grant::Focus { focus, level } => {
                if character.has_focus(focus) {
                    tracing::debug!(source = %source, focus = %focus, "Focus already held, redirecting");
                    pending.push(PendingItem::PickFocus {
                        options: Vec::new(),
                        reason: Some(format!(
                            "{} grants {}, which is already known; pick another focus",
                            source, focus
                        )),
                    });
                } else {
                    let spawned = apply_focus(character, rules, focus, *level)?;
                    pending.extend(spawned.into_pending());
                }
            }
            Grant::FocusChoice { options } => {
                pending.push(PendingItem::PickFocus {
                    options: options.clone(),
                    reason: Some(format!("{} grants a focus", source)),
                });
            }
            Grant::AttributeChoice { target } => {
                let exclude: Vec<Attribute> = Attribute::ALL
                    .into_iter()
                    .filter(|a| character.attributes.score(*a) >= *target)
                    .collect();
                if exclude.len() == Attribute::ALL.len() {
                    tracing::debug!(
                        source = %source,
                        score = *target,
                        "Every attribute already at target, skipping"
                    );
                    continue;
                }
                pending.push(PendingItem::PickAttribute {
                    target: *target,
                    exclude,
                    reason: Some(format!("{} sets one attribute to {}", source, target)),
                });
            }
            Grant::Contact {
                relationship,
                context,
            } => {
                pending.push(PendingItem::AddContact {
                    relationship: relationship.clone(),
                    context: context.clone(),
                });
            }
            Grant::CyberwarePackageChoice { options } => {
                if let Some(installed) = &character.cyberware_package {
                    tracing::debug!(
                        source = %source,
                        package = %installed.name,
                        "Cyberware package already installed, skipping"
                    );
                    continue;
                }
                pending.push(PendingItem::PickCyberwarePackage {
                    options: options.clone(),
                });
            }
        }
    }

    if !pending.is_empty() {
        tracing::debug!(source = %source, spawned = pending.len(), "Grants queued pending items");
    }
    Ok(pending)
}

/// Automatic skill grant. A capped skill becomes an open skill pick.
pub(crate) fn grant_skill_or_redirect(
    character: &mut Character,
    source: &str,
    skill: &str,
) -> Result<Option<PendingItem>, BuildError> {
    match skill_ledger::add(character, skill)? {
        SkillGrant::Granted { .. } => Ok(None),
        SkillGrant::NeedsRedirect => Ok(Some(PendingItem::PickSkill {
            category: SkillFilter::Any,
            options: Vec::new(),
            reason: Some(format!(
                "{} grants {}, which is already at level-{}; pick another skill",
                source, skill, MAX_SKILL_LEVEL
            )),
        })),
    }
}
