use charforge_domain::{Character, FocusEntry, RuleBook};

use super::execute_grants;
use crate::error::BuildError;
use crate::pending::Resolution;

pub const MAX_FOCUS_LEVEL: u8 = 2;

/// Add a focus at `level` and run its grants.
///
/// Unlike edges, a focus the character already holds is rejected.
pub fn apply_focus(
    character: &mut Character,
    rules: &RuleBook,
    name: &str,
    level: u8,
) -> Result<Resolution, BuildError> {
    let focus = rules
        .focus(name)
        .ok_or_else(|| BuildError::unknown("focus", name))?;
    if character.has_focus(&focus.name) {
        return Err(BuildError::duplicate("focus", &focus.name));
    }
    if !(1..=MAX_FOCUS_LEVEL).contains(&level) {
        return Err(BuildError::invalid_option(
            level.to_string(),
            format!("focus level must be 1 to {}", MAX_FOCUS_LEVEL),
        ));
    }

    character.foci.push(FocusEntry {
        name: focus.name.clone(),
        level,
    });
    let pending = execute_grants(character, rules, &focus.name, &focus.grants)?;

    tracing::info!(focus = %focus.name, level, pending = pending.len(), "Applied focus");
    Ok(Resolution::from_pending(pending))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pending::PendingItem;
    use charforge_domain::SkillFilter;

    fn rules() -> RuleBook {
        RuleBook::builtin().expect("bundled tables parse")
    }

    #[test]
    fn focus_grants_its_skill() {
        let rules = rules();
        let mut character = Character::new();
        let resolution = apply_focus(&mut character, &rules, "Alert", 1).expect("known focus");
        assert!(resolution.is_applied());
        assert_eq!(character.focus_level("Alert"), Some(1));
        assert_eq!(character.skill_level("Notice"), Some(0));
    }

    #[test]
    fn each_blocked_skill_redirects_separately() {
        let rules = rules();
        let mut character = Character::new();
        character.skills.insert("Heal".to_string(), 1);
        character.skills.insert("Fix".to_string(), 1);

        let pending = apply_focus(&mut character, &rules, "Cyberdoc", 1)
            .expect("known focus")
            .into_pending();

        assert_eq!(pending.len(), 2);
        let reasons: Vec<_> = pending.iter().filter_map(|p| p.reason()).collect();
        assert!(reasons[0].contains("Heal"));
        assert!(reasons[1].contains("Fix"));
    }

    #[test]
    fn choice_focus_carries_option_list() {
        let rules = rules();
        let mut character = Character::new();
        let pending = apply_focus(&mut character, &rules, "Close Combatant", 1)
            .expect("known focus")
            .into_pending();
        match pending.as_slice() {
            [PendingItem::PickSkill {
                category, options, ..
            }] => {
                assert_eq!(*category, SkillFilter::Combat);
                assert_eq!(options, &["Punch", "Stab"]);
            }
            other => panic!("expected one pickSkill, got {:?}", other),
        }
    }

    #[test]
    fn duplicate_focus_is_fatal() {
        let rules = rules();
        let mut character = Character::new();
        apply_focus(&mut character, &rules, "Healer", 1).expect("first time");
        let err = apply_focus(&mut character, &rules, "Healer", 1).expect_err("duplicate");
        assert!(matches!(err, BuildError::DuplicateSelection { kind: "focus", .. }));
        assert_eq!(character.foci.len(), 1);
        assert_eq!(character.skill_level("Heal"), Some(0));
    }

    #[test]
    fn unknown_focus_and_bad_level_are_rejected() {
        let rules = rules();
        let mut character = Character::new();
        assert!(matches!(
            apply_focus(&mut character, &rules, "Pyromancer", 1),
            Err(BuildError::UnknownEntity { kind: "focus", .. })
        ));
        assert!(matches!(
            apply_focus(&mut character, &rules, "Healer", 3),
            Err(BuildError::InvalidOption { .. })
        ));
        assert!(character.foci.is_empty());
    }
}
