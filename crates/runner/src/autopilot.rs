//! Autopilot session - drives one build end to end with random valid choices.

use anyhow::{bail, Context, Result};
use rand::seq::SliceRandom;
use rand::Rng;

use charforge_domain::value_objects::{ANY_COMBAT, ANY_SKILL};
use charforge_domain::{Attribute, AttributeCategory, Character, RuleBook, SkillFilter};
use charforge_engine::apply::{parse_growth_entry, GrowthChoices, GrowthEntry, StatScope};
use charforge_engine::resolve::skillplug_cost;
use charforge_engine::{skill_ledger, CharacterBuilder, PendingChoice, PendingItem};

const CONTACT_NAMES: [&str; 6] = [
    "Ada Quill",
    "Moss",
    "Ren Hollis",
    "Tamsin Vey",
    "Oko Brand",
    "Lark Denholm",
];

/// Knobs for one automated session.
#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    pub offer_count: usize,
    pub edge_picks: usize,
}

/// Build a complete character without a human in the loop.
pub fn run<R: Rng>(rules: &RuleBook, rng: R, settings: SessionSettings) -> Result<Character> {
    let mut builder = CharacterBuilder::new(rules, rng);
    builder.roll_attributes()?;

    let background = builder
        .offer_backgrounds(settings.offer_count)
        .first()
        .map(|b| b.name.clone())
        .context("no backgrounds to offer")?;
    let outcome = builder.apply_background(&background)?;
    settle(&mut builder)?;

    for _ in 0..outcome.growth_picks {
        let (face, entry) = builder.roll_growth()?;
        tracing::info!(face, entry = %entry, "Growth roll");
        let choices = growth_choices(&mut builder, &entry)?;
        builder.resolve_growth(&entry, &choices)?;
    }
    for _ in 0..outcome.learning_picks {
        let (face, entry) = builder.roll_learning()?;
        tracing::info!(face, entry = %entry, "Learning roll");
        let skill = learning_skill(&mut builder, &entry)?;
        builder.resolve_learning(&skill)?;
    }

    for _ in 0..settings.edge_picks {
        let Some(edge) = builder
            .offer_edges(settings.offer_count)
            .first()
            .map(|e| e.name.clone())
        else {
            break;
        };
        builder.apply_edge(&edge)?;
        settle(&mut builder)?;
    }

    if let Some(focus) = builder
        .offer_foci(settings.offer_count)
        .first()
        .map(|f| f.name.clone())
    {
        builder.apply_focus(&focus)?;
        settle(&mut builder)?;
    }

    if let Some(kit) = rules.kits().choose(builder.rng_mut()) {
        builder.equip_kit(&kit.name)?;
    }
    if let Some(item) = builder.eligible_specialty_items().first() {
        builder.equip_specialty(&item.name)?;
    }

    let name = fresh_contact_name(&builder)?;
    builder.add_contact(&name, "friend", "someone from before")?;

    Ok(builder.finish()?)
}

/// Answer every queued item from its candidates.
fn settle<R: Rng>(builder: &mut CharacterBuilder<'_, R>) -> Result<()> {
    while let Some(item) = builder.next_pending().cloned() {
        let choice = match &item {
            PendingItem::AddContact { .. } => PendingChoice::One(fresh_contact_name(builder)?),
            PendingItem::PickSkillplugs { budget } => {
                let mut candidates = builder.candidates();
                candidates.shuffle(builder.rng_mut());
                let mut spent = 0;
                let mut picks = Vec::new();
                for skill in candidates {
                    let Some(cost) = skillplug_cost(&skill) else {
                        continue;
                    };
                    if spent + cost <= *budget {
                        spent += cost;
                        picks.push(skill);
                    }
                }
                PendingChoice::Many(picks)
            }
            _ => {
                let candidates = builder.candidates();
                match candidates.choose(builder.rng_mut()) {
                    Some(choice) => PendingChoice::One(choice.clone()),
                    None => bail!("no valid answer for pending {}", item.kind()),
                }
            }
        };
        tracing::info!(kind = item.kind(), choice = %choice, "Answering pending item");
        builder.resolve_next(choice)?;
    }
    Ok(())
}

fn growth_choices<R: Rng>(
    builder: &mut CharacterBuilder<'_, R>,
    entry: &str,
) -> Result<GrowthChoices> {
    Ok(match parse_growth_entry(entry)? {
        GrowthEntry::Compound { .. } => GrowthChoices::compound(
            lowest(builder.character(), StatScope::Category(AttributeCategory::Physical)),
            lowest(builder.character(), StatScope::Category(AttributeCategory::Mental)),
        ),
        GrowthEntry::Stat { scope, .. } => GrowthChoices::stat(lowest(builder.character(), scope)),
        GrowthEntry::Skill(skill) => match open_skill(builder, &skill) {
            Some(skill) => GrowthChoices::skill(skill),
            None => GrowthChoices::default(),
        },
    })
}

fn learning_skill<R: Rng>(builder: &mut CharacterBuilder<'_, R>, entry: &str) -> Result<String> {
    open_skill(builder, entry).with_context(|| format!("no open skill for learning entry {}", entry))
}

/// The rolled skill if it can still be granted, otherwise a random open
/// skill of the same kind.
fn open_skill<R: Rng>(builder: &mut CharacterBuilder<'_, R>, entry: &str) -> Option<String> {
    let filter = match entry {
        ANY_COMBAT => SkillFilter::Combat,
        ANY_SKILL => SkillFilter::Any,
        skill if skill_ledger::validate(builder.character(), skill).valid => {
            return Some(skill.to_string());
        }
        _ => SkillFilter::Any,
    };
    let open: Vec<&str> = filter
        .skills()
        .filter(|s| skill_ledger::validate(builder.character(), s).valid)
        .collect();
    open.choose(builder.rng_mut()).map(|s| s.to_string())
}

fn lowest(character: &Character, scope: StatScope) -> Attribute {
    Attribute::ALL
        .into_iter()
        .filter(|a| scope.admits(*a))
        .min_by_key(|a| character.attributes.score(*a))
        .unwrap_or(Attribute::Strength)
}

fn fresh_contact_name<R: Rng>(builder: &CharacterBuilder<'_, R>) -> Result<String> {
    let taken = &builder.character().contacts;
    CONTACT_NAMES
        .iter()
        .find(|name| taken.iter().all(|c| c.name != **name))
        .map(|name| name.to_string())
        .context("ran out of contact names")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn settings() -> SessionSettings {
        SessionSettings {
            offer_count: 3,
            edge_picks: 2,
        }
    }

    #[test]
    fn sessions_complete_across_seeds() {
        let rules = RuleBook::builtin().expect("bundled tables parse");
        for seed in 0..40 {
            let character = run(&rules, StdRng::seed_from_u64(seed), settings())
                .unwrap_or_else(|e| panic!("seed {} failed: {:#}", seed, e));
            assert!(character.background.is_some());
            assert_eq!(character.edges.len(), 2);
            assert!(!character.foci.is_empty());
            assert!(!character.contacts.is_empty());
            assert!(character.derived.hp >= 1);
        }
    }

    #[test]
    fn same_seed_same_character() {
        let rules = RuleBook::builtin().expect("bundled tables parse");
        let first = run(&rules, StdRng::seed_from_u64(99), settings()).expect("completes");
        let second = run(&rules, StdRng::seed_from_u64(99), settings()).expect("completes");
        assert_eq!(first, second);
    }

    #[test]
    fn lowest_respects_scope() {
        let mut character = Character::new();
        character.attributes.set_score(Attribute::Intelligence, 4);
        character.attributes.set_score(Attribute::Dexterity, 5);
        assert_eq!(
            lowest(
                &character,
                StatScope::Category(AttributeCategory::Physical)
            ),
            Attribute::Dexterity
        );
        assert_eq!(lowest(&character, StatScope::Any), Attribute::Intelligence);
    }
}
