//! Derived stats - hit points, attack bonus, saves and the rest.
//!
//! A pure function of level, attributes, edges and worn armor. Safe to run
//! again whenever those inputs change.

use charforge_domain::{Attribute, Character, DerivedStats, SavingThrows};

/// Adds 2 hit points per level and 1 to the trauma target.
pub const HARD_TO_KILL: &str = "Hard To Kill";
/// Adds 1 to base attack bonus.
pub const ON_TARGET: &str = "On Target";
/// Adds 1 to the starting contact bonus.
pub const FACE: &str = "Face";

const BASE_HP: i32 = 6;
const HP_PER_LEVEL: i32 = 4;
const SAVE_BASELINE: i32 = 16;
const TRAUMA_BASELINE: i32 = 6;

/// Compute derived stats, store them on the character and return them.
pub fn calculate_derived_stats(character: &mut Character) -> DerivedStats {
    let derived = derive(character);
    character.derived = derived;
    tracing::info!(
        hp = derived.hp,
        bab = derived.bab,
        trauma_target = derived.trauma_target,
        "Computed derived stats"
    );
    derived
}

/// Derived stats for the character as it stands, without storing them.
pub fn derive(character: &Character) -> DerivedStats {
    let level = i32::from(character.level.max(1));
    let attrs = &character.attributes;
    let edge = |name: &str| i32::from(character.has_edge(name));

    let con = attrs.modifier(Attribute::Constitution);
    let hp = (BASE_HP + HP_PER_LEVEL * (level - 1) + level * (con + 2 * edge(HARD_TO_KILL))).max(1);

    let save = |pair: [Attribute; 2]| {
        SAVE_BASELINE - level - attrs.best_modifier(&pair).unwrap_or(0)
    };
    let saving_throws = SavingThrows {
        physical: save([Attribute::Strength, Attribute::Constitution]),
        evasion: save([Attribute::Dexterity, Attribute::Intelligence]),
        mental: save([Attribute::Wisdom, Attribute::Charisma]),
    };

    let damage_soak = character.worn_armor().map(|a| a.soak).max().unwrap_or(0);
    let trauma_armor = character
        .worn_armor()
        .map(|a| a.trauma_modifier)
        .max()
        .unwrap_or(0);

    DerivedStats {
        hp,
        bab: base_attack_bonus(character),
        saving_throws,
        damage_soak,
        initiative: attrs.modifier(Attribute::Wisdom),
        trauma_target: TRAUMA_BASELINE + trauma_armor + edge(HARD_TO_KILL),
        starting_contact_bonus: attrs.modifier(Attribute::Charisma).max(0) + edge(FACE),
    }
}

/// Half the level, rounded down, plus 1 for [`ON_TARGET`].
pub fn base_attack_bonus(character: &Character) -> i32 {
    i32::from(character.level) / 2 + i32::from(character.has_edge(ON_TARGET))
}
