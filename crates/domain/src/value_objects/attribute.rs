//! Attributes, their categories and the score-to-modifier bands.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Highest score an attribute may reach during creation.
pub const ATTRIBUTE_MAX: i32 = 18;
/// Lowest score 3d6 can produce.
pub const ATTRIBUTE_MIN: i32 = 3;
/// Score a player may substitute for one rolled attribute.
pub const FOURTEEN: i32 = 14;
/// Score every attribute holds before generation.
pub const DEFAULT_SCORE: i32 = 10;

/// The six fixed abilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Attribute {
    /// All attributes in rolling order.
    pub const ALL: [Attribute; 6] = [
        Attribute::Strength,
        Attribute::Dexterity,
        Attribute::Constitution,
        Attribute::Intelligence,
        Attribute::Wisdom,
        Attribute::Charisma,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Dexterity => "dexterity",
            Self::Constitution => "constitution",
            Self::Intelligence => "intelligence",
            Self::Wisdom => "wisdom",
            Self::Charisma => "charisma",
        }
    }

    pub fn category(&self) -> AttributeCategory {
        match self {
            Self::Strength | Self::Dexterity | Self::Constitution => AttributeCategory::Physical,
            Self::Intelligence | Self::Wisdom | Self::Charisma => AttributeCategory::Mental,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Attribute {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strength" | "str" => Ok(Self::Strength),
            "dexterity" | "dex" => Ok(Self::Dexterity),
            "constitution" | "con" => Ok(Self::Constitution),
            "intelligence" | "int" => Ok(Self::Intelligence),
            "wisdom" | "wis" => Ok(Self::Wisdom),
            "charisma" | "cha" => Ok(Self::Charisma),
            _ => Err(DomainError::parse(format!("Unknown attribute: {}", s))),
        }
    }
}

/// Tri-attribute grouping used by growth-table bonuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeCategory {
    Physical,
    Mental,
}

impl AttributeCategory {
    pub fn members(&self) -> [Attribute; 3] {
        match self {
            Self::Physical => [
                Attribute::Strength,
                Attribute::Dexterity,
                Attribute::Constitution,
            ],
            Self::Mental => [
                Attribute::Intelligence,
                Attribute::Wisdom,
                Attribute::Charisma,
            ],
        }
    }
}

impl fmt::Display for AttributeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Physical => f.write_str("Physical"),
            Self::Mental => f.write_str("Mental"),
        }
    }
}

/// Modifier for a raw score.
///
/// 3 or less: -2, 4-7: -1, 8-13: 0, 14-17: +1, 18 and up: +2.
pub fn modifier_for_score(score: i32) -> i32 {
    match score {
        i32::MIN..=3 => -2,
        4..=7 => -1,
        8..=13 => 0,
        14..=17 => 1,
        _ => 2,
    }
}

/// A score paired with its modifier.
///
/// The modifier is always `modifier_for_score(score)`; the only way to change
/// the score is [`Attributes::set_score`], which recomputes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredScore")]
pub struct AttributeScore {
    score: i32,
    #[serde(rename = "mod")]
    modifier: i32,
}

impl AttributeScore {
    pub fn new(score: i32) -> Self {
        Self {
            score,
            modifier: modifier_for_score(score),
        }
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn modifier(&self) -> i32 {
        self.modifier
    }
}

/// Wire shape of a score; the stored modifier is ignored and recomputed.
#[derive(Deserialize)]
struct StoredScore {
    score: i32,
}

impl From<StoredScore> for AttributeScore {
    fn from(stored: StoredScore) -> Self {
        Self::new(stored.score)
    }
}

impl Default for AttributeScore {
    fn default() -> Self {
        Self::new(DEFAULT_SCORE)
    }
}

/// The six attribute scores of a character.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    strength: AttributeScore,
    dexterity: AttributeScore,
    constitution: AttributeScore,
    intelligence: AttributeScore,
    wisdom: AttributeScore,
    charisma: AttributeScore,
}

impl Attributes {
    pub fn get(&self, attribute: Attribute) -> AttributeScore {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Dexterity => self.dexterity,
            Attribute::Constitution => self.constitution,
            Attribute::Intelligence => self.intelligence,
            Attribute::Wisdom => self.wisdom,
            Attribute::Charisma => self.charisma,
        }
    }

    pub fn score(&self, attribute: Attribute) -> i32 {
        self.get(attribute).score
    }

    pub fn modifier(&self, attribute: Attribute) -> i32 {
        self.get(attribute).modifier
    }

    /// Set a score and recompute its modifier.
    pub fn set_score(&mut self, attribute: Attribute, score: i32) {
        let slot = match attribute {
            Attribute::Strength => &mut self.strength,
            Attribute::Dexterity => &mut self.dexterity,
            Attribute::Constitution => &mut self.constitution,
            Attribute::Intelligence => &mut self.intelligence,
            Attribute::Wisdom => &mut self.wisdom,
            Attribute::Charisma => &mut self.charisma,
        };
        *slot = AttributeScore::new(score);
    }

    /// Raise a score by `amount`, never past [`ATTRIBUTE_MAX`]. Returns the new score.
    pub fn raise(&mut self, attribute: Attribute, amount: i32) -> i32 {
        let raised = self.score(attribute).saturating_add(amount).min(ATTRIBUTE_MAX);
        self.set_score(attribute, raised);
        raised
    }

    /// Highest modifier among the given attributes.
    pub fn best_modifier(&self, attributes: &[Attribute]) -> Option<i32> {
        attributes.iter().map(|a| self.modifier(*a)).max()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, AttributeScore)> + '_ {
        Attribute::ALL.into_iter().map(move |a| (a, self.get(a)))
    }
}
