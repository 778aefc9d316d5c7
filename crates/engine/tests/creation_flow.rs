//! End-to-end creation scenarios driven through the public engine API.

use charforge_domain::{Attribute, Character, RuleBook, SkillFilter};
use charforge_engine::{
    apply_background, apply_edge, calculate_ac, calculate_derived_stats, resolve_growth_roll,
    resolve_pending, ArmorClass, BuildError, CharacterBuilder, GrowthChoices, PendingChoice,
    PendingItem,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn rules() -> RuleBook {
    RuleBook::builtin().expect("bundled tables parse")
}

#[test]
fn criminal_background_on_fresh_character() {
    let rules = rules();
    let mut character = Character::new();

    let outcome = apply_background(&mut character, &rules, "Criminal").expect("known background");

    assert_eq!(character.background.as_deref(), Some("Criminal"));
    assert_eq!(character.skill_level("Sneak"), Some(0));
    assert!(outcome.resolution.pending().is_empty());
    assert_eq!(outcome.growth_picks, 1);
    assert_eq!(outcome.learning_picks, 2);
    assert_eq!(outcome.growth.len(), 6);
    assert_eq!(outcome.learning.len(), 8);
}

#[test]
fn face_with_connect_capped_redirects() {
    let rules = rules();
    let mut character = Character::new();
    character.skills.insert("Connect".to_string(), 1);

    let pending = apply_edge(&mut character, &rules, "Face")
        .expect("known edge")
        .into_pending();

    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].kind(), "pickSkill");
    assert!(matches!(
        &pending[0],
        PendingItem::PickSkill {
            category: SkillFilter::Any,
            ..
        }
    ));
    assert!(pending[0].reason().is_some_and(|r| r.contains("Connect")));
}

#[test]
fn skillwire_package_spawns_budgeted_plug_pick() {
    let rules = rules();
    let mut character = Character::new();

    let spawned = resolve_pending(
        &mut character,
        &rules,
        &PendingItem::PickCyberwarePackage { options: vec![] },
        &PendingChoice::from("Skillwire Rig"),
    )
    .expect("known package")
    .into_pending();

    let installed = character.cyberware_package.clone().expect("installed");
    assert_eq!(installed.name, "Skillwire Rig");
    assert_eq!(spawned, vec![PendingItem::PickSkillplugs { budget: 3 }]);

    let over = PendingChoice::from(vec!["Shoot".to_string(), "Stab".to_string()]);
    let err = resolve_pending(&mut character, &rules, &spawned[0], &over)
        .expect_err("cost 4 over budget 3");
    assert!(matches!(err, BuildError::BudgetExceeded { cost: 4, budget: 3 }));
    assert_eq!(
        character.cyberware_package.as_ref().map(|p| &p.items),
        Some(&installed.items)
    );
}

#[test]
fn armor_class_table_lookup() {
    let rules = rules();
    assert_eq!(
        calculate_ac(&rules, "light", true).expect("known armor"),
        ArmorClass {
            melee: 13,
            ranged: 15
        }
    );
    assert!(matches!(
        calculate_ac(&rules, "mithril", true),
        Err(BuildError::UnknownEntity { .. })
    ));
}

#[test]
fn growth_clamps_and_splits() {
    let mut character = Character::new();
    character.attributes.set_score(Attribute::Dexterity, 17);
    resolve_growth_roll(
        &mut character,
        "+2 Physical",
        &GrowthChoices::stat(Attribute::Dexterity),
    )
    .expect("physical");
    assert_eq!(character.attributes.score(Attribute::Dexterity), 18);

    resolve_growth_roll(
        &mut character,
        "+2 Mental",
        &GrowthChoices::split(Attribute::Intelligence, Attribute::Charisma),
    )
    .expect("two mental stats");
    assert_eq!(character.attributes.score(Attribute::Intelligence), 11);
    assert_eq!(character.attributes.score(Attribute::Charisma), 11);
}

#[test]
fn full_session_reaches_a_complete_character() {
    let rules = rules();
    let mut builder = CharacterBuilder::new(&rules, StdRng::seed_from_u64(2024));

    builder.roll_attributes().expect("no pending");
    builder.apply_background("Soldier").expect("known");
    builder.resolve_next("Shoot").expect("combat pick");

    builder
        .resolve_growth(
            "+1 Physical, +1 Mental",
            &GrowthChoices::compound(Attribute::Strength, Attribute::Wisdom),
        )
        .expect("compound growth");
    builder.resolve_learning("Exert").expect("learning");
    builder.resolve_learning("Exert").expect("learning");

    builder.apply_edge("Backed").expect("known edge");
    builder.resolve_next("Sal Okafor").expect("contact named");
    builder.apply_edge("Prodigy").expect("known edge");
    let choice = builder.candidates().first().cloned().expect("some attribute open");
    builder.resolve_next(choice).expect("attribute pick");

    builder.apply_focus("Deadeye").expect("known focus");
    builder.equip_kit("Gunhand").expect("known kit");
    builder.add_contact("Rook", "friend", "old unit").expect("named");

    let character = builder.finish().expect("nothing pending");
    assert_eq!(character.skill_level("Shoot"), Some(1));
    assert_eq!(character.skill_level("Exert"), Some(1));
    assert_eq!(character.contacts.len(), 2);
    assert!(character.derived.hp >= 1);
    assert!(character
        .attributes
        .iter()
        .any(|(_, score)| score.score() == 18));

    let json = serde_json::to_string(&character).expect("serializable");
    let restored: Character = serde_json::from_str(&json).expect("deserializable");
    assert_eq!(restored, character);
}

proptest! {
    #[test]
    fn derived_hp_is_at_least_one(con in 3i32..=18, level in 1u8..=10, tough in any::<bool>()) {
        let mut character = Character::new();
        character.level = level;
        character.attributes.set_score(Attribute::Constitution, con);
        if tough {
            character.edges.push("Hard To Kill".to_string());
        }
        prop_assert!(calculate_derived_stats(&mut character).hp >= 1);
    }

    #[test]
    fn edge_offers_never_repeat_or_resurface(seed in any::<u64>(), count in 1usize..8) {
        let rules = rules();
        let mut builder = CharacterBuilder::new(&rules, StdRng::seed_from_u64(seed));
        builder.apply_edge("Hard To Kill").expect("passive edge");

        for _ in 0..5 {
            let offered = builder.offer_edges(count);
            let mut names: Vec<_> = offered.iter().map(|e| e.name.as_str()).collect();
            prop_assert!(names.iter().all(|n| *n != "Hard To Kill"));
            let before = names.len();
            names.sort_unstable();
            names.dedup();
            prop_assert_eq!(names.len(), before);
            prop_assert_eq!(before, count.min(rules.edges().len() - 1));
        }
    }
}
