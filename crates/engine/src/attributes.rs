//! Attribute generation: rolled scores, the standard array and bonus rolls.

use rand::Rng;

use charforge_domain::value_objects::{ATTRIBUTE_MAX, FOURTEEN};
use charforge_domain::{roll_dice, roll_die, Attribute, Character};

use crate::error::BuildError;

/// Scores assigned, in order, by [`assign_array`].
pub const STANDARD_ARRAY: [i32; 6] = [14, 12, 11, 10, 9, 7];

/// Rerolls allowed before the bonus roll falls back to the first open attribute.
const MAX_BONUS_REROLLS: usize = 12;

/// Roll 3d6 for each attribute in order. Returns the six scores.
pub fn roll_attributes<R: Rng + ?Sized>(character: &mut Character, rng: &mut R) -> [i32; 6] {
    let mut scores = [0; 6];
    for (slot, attribute) in scores.iter_mut().zip(Attribute::ALL) {
        *slot = roll_dice(rng, 3, 6);
        character.attributes.set_score(attribute, *slot);
    }
    tracing::info!(?scores, "Rolled attributes");
    scores
}

/// Replace one score with 14. Returns the score it replaced.
pub fn replace_with_fourteen(character: &mut Character, attribute: Attribute) -> i32 {
    let previous = character.attributes.score(attribute);
    character.attributes.set_score(attribute, FOURTEEN);
    tracing::debug!(attribute = %attribute, previous, "Replaced score with 14");
    previous
}

/// Assign the standard array, highest score first, to attributes in `order`.
pub fn assign_array(character: &mut Character, order: &[Attribute]) -> Result<(), BuildError> {
    if order.len() != STANDARD_ARRAY.len() {
        return Err(BuildError::invalid_option(
            format!("{} attributes", order.len()),
            "the standard array needs all six attributes",
        ));
    }
    for (index, attribute) in order.iter().enumerate() {
        if order[..index].contains(attribute) {
            return Err(BuildError::duplicate("attribute", attribute.name()));
        }
    }

    for (attribute, score) in order.iter().zip(STANDARD_ARRAY) {
        character.attributes.set_score(*attribute, score);
    }
    tracing::info!("Assigned standard array");
    Ok(())
}

/// Raise a d6-chosen attribute by `amount`, rerolling picks already at 18.
///
/// After a bounded number of rerolls the first attribute below 18 is taken.
/// Returns the attribute and its new score, or `None` when all six are maxed.
pub fn roll_bonus_attribute<R: Rng + ?Sized>(
    character: &mut Character,
    rng: &mut R,
    amount: i32,
) -> Option<(Attribute, i32)> {
    let open = |character: &Character, attribute: Attribute| {
        character.attributes.score(attribute) < ATTRIBUTE_MAX
    };

    let rolled = (0..=MAX_BONUS_REROLLS)
        .map(|_| Attribute::ALL[(roll_die(rng, 6) - 1) as usize])
        .find(|attribute| open(character, *attribute));
    let attribute = rolled.or_else(|| {
        Attribute::ALL
            .into_iter()
            .find(|attribute| open(character, *attribute))
    })?;

    let score = character.attributes.raise(attribute, amount);
    tracing::debug!(attribute = %attribute, score, "Bonus roll raised attribute");
    Some((attribute, score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use charforge_domain::value_objects::ATTRIBUTE_MIN;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn standard_array_in_order() {
        let mut character = Character::new();
        let order = [
            Attribute::Dexterity,
            Attribute::Intelligence,
            Attribute::Constitution,
            Attribute::Wisdom,
            Attribute::Charisma,
            Attribute::Strength,
        ];
        assign_array(&mut character, &order).expect("six distinct");
        assert_eq!(character.attributes.score(Attribute::Dexterity), 14);
        assert_eq!(character.attributes.score(Attribute::Strength), 7);
        assert_eq!(character.attributes.modifier(Attribute::Strength), -1);
    }

    #[test]
    fn standard_array_rejects_repeats_and_short_lists() {
        let mut character = Character::new();
        let repeated = [Attribute::Strength; 6];
        assert!(matches!(
            assign_array(&mut character, &repeated),
            Err(BuildError::DuplicateSelection { .. })
        ));
        assert!(matches!(
            assign_array(&mut character, &[Attribute::Strength]),
            Err(BuildError::InvalidOption { .. })
        ));
        assert_eq!(character.attributes.score(Attribute::Strength), 10);
    }

    #[test]
    fn fourteen_replaces_a_low_roll() {
        let mut character = Character::new();
        character.attributes.set_score(Attribute::Charisma, 5);
        assert_eq!(replace_with_fourteen(&mut character, Attribute::Charisma), 5);
        assert_eq!(character.attributes.score(Attribute::Charisma), 14);
    }

    #[test]
    fn bonus_roll_skips_maxed_attributes() {
        let mut character = Character::new();
        for attribute in Attribute::ALL.into_iter().skip(1) {
            character.attributes.set_score(attribute, 18);
        }
        let mut rng = StdRng::seed_from_u64(3);
        let (attribute, score) =
            roll_bonus_attribute(&mut character, &mut rng, 2).expect("strength open");
        assert_eq!(attribute, Attribute::Strength);
        assert_eq!(score, 12);
    }

    #[test]
    fn bonus_roll_with_everything_maxed_is_none() {
        let mut character = Character::new();
        for attribute in Attribute::ALL {
            character.attributes.set_score(attribute, 18);
        }
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(roll_bonus_attribute(&mut character, &mut rng, 1), None);
    }

    proptest! {
        #[test]
        fn rolled_scores_stay_in_range(seed in any::<u64>()) {
            let mut character = Character::new();
            let mut rng = StdRng::seed_from_u64(seed);
            let scores = roll_attributes(&mut character, &mut rng);
            for (score, attribute) in scores.iter().zip(Attribute::ALL) {
                prop_assert!((ATTRIBUTE_MIN..=ATTRIBUTE_MAX).contains(score));
                prop_assert_eq!(character.attributes.score(attribute), *score);
            }
        }
    }
}
