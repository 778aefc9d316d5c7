//! Dice rolling value objects and parsing
//!
//! Uniform die draws for attribute generation and table rolls, plus the
//! `XdY±Z` formulas that weapon records use for damage.
//! The generator is always supplied by the caller so sessions can be seeded.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error when parsing a dice formula
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceParseError {
    /// The formula string is empty
    #[error("Empty dice formula")]
    Empty,
    /// Invalid format - expected XdY or XdY+Z
    #[error("Invalid dice format: {0}")]
    InvalidFormat(String),
    /// Dice count must be at least 1
    #[error("Dice count must be at least 1")]
    InvalidDiceCount,
    /// Die size must be at least 2
    #[error("Die size must be at least 2")]
    InvalidDieSize,
}

/// Roll a single die with `sides` faces, uniformly in `1..=sides`.
///
/// A die with fewer than one face is treated as a d1.
pub fn roll_die<R: Rng + ?Sized>(rng: &mut R, sides: u8) -> i32 {
    rng.gen_range(1..=i32::from(sides.max(1)))
}

/// Sum of `count` independent rolls of a `sides`-faced die.
pub fn roll_dice<R: Rng + ?Sized>(rng: &mut R, count: u8, sides: u8) -> i32 {
    (0..count).map(|_| roll_die(rng, sides)).sum()
}

/// A parsed dice formula like "2d6+3"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceFormula {
    /// Number of dice to roll (X in XdY)
    pub dice_count: u8,
    /// Size of each die (Y in XdY)
    pub die_size: u8,
    /// Modifier to add/subtract after rolling (+Z or -Z)
    pub modifier: i32,
}

impl DiceFormula {
    /// Create a new dice formula
    pub fn new(dice_count: u8, die_size: u8, modifier: i32) -> Result<Self, DiceParseError> {
        if dice_count == 0 {
            return Err(DiceParseError::InvalidDiceCount);
        }
        if die_size < 2 {
            return Err(DiceParseError::InvalidDieSize);
        }
        Ok(Self {
            dice_count,
            die_size,
            modifier,
        })
    }

    /// Parse a dice formula string like "1d8", "2d6-1", "d10+2"
    ///
    /// A missing count ("d6") means one die.
    pub fn parse(input: &str) -> Result<Self, DiceParseError> {
        let input = input.trim().to_lowercase();
        if input.is_empty() {
            return Err(DiceParseError::Empty);
        }

        let (count_str, rest) = input.split_once('d').ok_or_else(|| {
            DiceParseError::InvalidFormat(format!("Missing 'd' separator in '{}'", input))
        })?;

        let dice_count: u8 = if count_str.is_empty() {
            1
        } else {
            count_str.parse().map_err(|_| {
                DiceParseError::InvalidFormat(format!("Invalid dice count: '{}'", count_str))
            })?
        };

        let (size_str, modifier) = match rest.find(['+', '-']) {
            Some(0) => {
                return Err(DiceParseError::InvalidFormat(format!(
                    "Invalid die size: '{}'",
                    rest
                )))
            }
            Some(pos) => {
                let modifier: i32 = rest[pos..].trim_start_matches('+').parse().map_err(|_| {
                    DiceParseError::InvalidFormat(format!("Invalid modifier: '{}'", &rest[pos..]))
                })?;
                (&rest[..pos], modifier)
            }
            None => (rest, 0),
        };

        let die_size: u8 = size_str.parse().map_err(|_| {
            DiceParseError::InvalidFormat(format!("Invalid die size: '{}'", size_str))
        })?;

        Self::new(dice_count, die_size, modifier)
    }

    /// Copy of this formula with `bonus` added to the modifier.
    pub fn with_bonus(&self, bonus: i32) -> Self {
        Self {
            modifier: self.modifier + bonus,
            ..self.clone()
        }
    }
}

impl fmt::Display for DiceFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.modifier {
            0 => write!(f, "{}d{}", self.dice_count, self.die_size),
            m if m > 0 => write!(f, "{}d{}+{}", self.dice_count, self.die_size, m),
            m => write!(f, "{}d{}{}", self.dice_count, self.die_size, m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_parse_simple() {
        let formula = DiceFormula::parse("1d8").expect("valid formula");
        assert_eq!(formula, DiceFormula::new(1, 8, 0).expect("valid formula"));
    }

    #[test]
    fn test_parse_shorthand() {
        let formula = DiceFormula::parse("d6").expect("valid formula");
        assert_eq!(formula.dice_count, 1);
        assert_eq!(formula.die_size, 6);
    }

    #[test]
    fn test_parse_modifiers() {
        assert_eq!(DiceFormula::parse("2d6+3").expect("valid").modifier, 3);
        assert_eq!(DiceFormula::parse("1D10-2").expect("valid").modifier, -2);
        assert_eq!(DiceFormula::parse("  3d6  ").expect("valid").dice_count, 3);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(DiceFormula::parse(""), Err(DiceParseError::Empty)));
        assert!(matches!(
            DiceFormula::parse("20"),
            Err(DiceParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            DiceFormula::parse("0d6"),
            Err(DiceParseError::InvalidDiceCount)
        ));
        assert!(matches!(
            DiceFormula::parse("1d1"),
            Err(DiceParseError::InvalidDieSize)
        ));
        assert!(matches!(
            DiceFormula::parse("1d-4"),
            Err(DiceParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_roll_die_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let roll = roll_die(&mut rng, 6);
            assert!((1..=6).contains(&roll));
        }
    }

    #[test]
    fn test_roll_die_hits_every_face() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = [false; 8];
        for _ in 0..1000 {
            seen[(roll_die(&mut rng, 8) - 1) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_roll_dice_sum_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let total = roll_dice(&mut rng, 3, 6);
            assert!((3..=18).contains(&total));
        }
    }

    #[test]
    fn test_with_bonus() {
        let formula = DiceFormula::parse("1d8").expect("valid formula").with_bonus(2);
        assert_eq!(formula.to_string(), "1d8+2");
    }

    #[test]
    fn test_display() {
        assert_eq!(DiceFormula::new(1, 6, 0).expect("valid").to_string(), "1d6");
        assert_eq!(DiceFormula::new(2, 4, -3).expect("valid").to_string(), "2d4-3");
    }
}
