//! Pending resolution - consumes one pending item with the caller's answer.
//!
//! Choices are validated against the item's constraints before anything is
//! written. A capped or out-of-category answer is an error here; redirection
//! already happened when the item was offered.

use std::collections::HashSet;
use std::str::FromStr;

use charforge_domain::value_objects::{is_combat_skill, is_known_skill};
use charforge_domain::{
    Attribute, Character, CyberwareItem, InstalledCyberware, RuleBook, SkillFilter,
};

use crate::apply::apply_focus;
use crate::contacts::add_contact;
use crate::error::BuildError;
use crate::pending::{PendingChoice, PendingItem, Resolution};
use crate::skill_ledger;

/// Skillplug skills outside the combat set.
pub const TECHNICAL_SKILLPLUGS: [&str; 5] = ["Drive", "Fix", "Heal", "Know", "Program"];
pub const COMBAT_SKILLPLUG_COST: u32 = 2;
pub const TECHNICAL_SKILLPLUG_COST: u32 = 1;

/// Point cost of a skillplug for `skill`, or `None` if no plug exists for it.
pub fn skillplug_cost(skill: &str) -> Option<u32> {
    if is_combat_skill(skill) {
        Some(COMBAT_SKILLPLUG_COST)
    } else if TECHNICAL_SKILLPLUGS.contains(&skill) {
        Some(TECHNICAL_SKILLPLUG_COST)
    } else {
        None
    }
}

/// Resolve `item` with `choice`, returning any follow-up items.
///
/// Spawned items belong at the front of the caller's queue.
pub fn resolve_pending(
    character: &mut Character,
    rules: &RuleBook,
    item: &PendingItem,
    choice: &PendingChoice,
) -> Result<Resolution, BuildError> {
    let resolution = match item {
        PendingItem::PickSkill {
            category, options, ..
        } => {
            let skill = single(choice)?;
            resolve_skill(character, *category, options, skill)?;
            Resolution::Applied
        }
        PendingItem::PickFocus { options, .. } => {
            let focus = single(choice)?;
            require_listed(options, focus)?;
            if character.has_focus(focus) {
                return Err(BuildError::duplicate("focus", focus));
            }
            apply_focus(character, rules, focus, 1)?
        }
        PendingItem::PickAttribute {
            target, exclude, ..
        } => {
            let name = single(choice)?;
            let attribute =
                Attribute::from_str(name).map_err(|_| BuildError::unknown("attribute", name))?;
            if exclude.contains(&attribute) {
                return Err(BuildError::invalid_option(name, "attribute is excluded"));
            }
            character.attributes.set_score(attribute, *target);
            tracing::debug!(attribute = %attribute, score = *target, "Set attribute");
            Resolution::Applied
        }
        PendingItem::AddContact {
            relationship,
            context,
        } => {
            add_contact(character, single(choice)?, relationship, context)?;
            Resolution::Applied
        }
        PendingItem::PickCyberwarePackage { options } => {
            let name = single(choice)?;
            require_listed(options, name)?;
            install_package(character, rules, name)?
        }
        PendingItem::PickSkillplugs { budget } => {
            install_skillplugs(character, &choice.values(), *budget)?;
            Resolution::Applied
        }
        PendingItem::Unrecognized { kind } => {
            return Err(BuildError::UnknownPendingKind(kind.clone()));
        }
    };

    tracing::debug!(
        kind = item.kind(),
        choice = %choice,
        spawned = resolution.pending().len(),
        "Resolved pending item"
    );
    Ok(resolution)
}

fn single(choice: &PendingChoice) -> Result<&str, BuildError> {
    choice
        .single()
        .ok_or_else(|| BuildError::invalid_option(choice.to_string(), "expected one answer"))
}

fn require_listed(options: &[String], choice: &str) -> Result<(), BuildError> {
    if options.is_empty() || options.iter().any(|o| o == choice) {
        Ok(())
    } else {
        Err(BuildError::invalid_option(
            choice,
            format!("not one of {}", options.join(", ")),
        ))
    }
}

fn resolve_skill(
    character: &mut Character,
    category: SkillFilter,
    options: &[String],
    skill: &str,
) -> Result<(), BuildError> {
    if !is_known_skill(skill) {
        return Err(BuildError::unknown("skill", skill));
    }
    if !category.admits(skill) {
        return Err(BuildError::invalid_category(skill, category));
    }
    require_listed(options, skill)?;
    skill_ledger::add_bonus(character, skill)?;
    Ok(())
}

fn install_package(
    character: &mut Character,
    rules: &RuleBook,
    name: &str,
) -> Result<Resolution, BuildError> {
    let package = rules
        .cyberware_package(name)
        .ok_or_else(|| BuildError::unknown("cyberware package", name))?;
    if let Some(installed) = &character.cyberware_package {
        return Err(BuildError::duplicate("cyberware package", &installed.name));
    }

    character.cyberware_package = Some(InstalledCyberware {
        name: package.name.clone(),
        items: package.items.clone(),
    });
    tracing::info!(package = %package.name, items = package.items.len(), "Installed cyberware package");

    Ok(match package.skillplug_budget {
        Some(budget) => Resolution::Spawned(vec![PendingItem::PickSkillplugs { budget }]),
        None => Resolution::Applied,
    })
}

fn install_skillplugs(
    character: &mut Character,
    skills: &[&str],
    budget: u32,
) -> Result<(), BuildError> {
    let mut seen = HashSet::new();
    let mut cost = 0;
    for skill in skills {
        if !seen.insert(*skill) {
            return Err(BuildError::duplicate("skillplug", *skill));
        }
        cost += skillplug_cost(skill)
            .ok_or_else(|| BuildError::invalid_category(*skill, "skillplug"))?;
    }
    if cost > budget {
        return Err(BuildError::BudgetExceeded { cost, budget });
    }

    let installed = character.cyberware_package.as_mut().ok_or_else(|| {
        BuildError::invalid_option(skills.join(", "), "no cyberware package installed")
    })?;
    installed
        .items
        .extend(skills.iter().map(|skill| CyberwareItem {
            name: format!("Skillplug ({})", skill),
            strain: 0.0,
            cost: 0,
        }));
    tracing::info!(plugs = skills.len(), cost, budget, "Installed skillplugs");
    Ok(())
}
