//! Value objects - Immutable objects defined by their attributes

mod attribute;
mod dice;
mod skill;

pub use attribute::{
    modifier_for_score, Attribute, AttributeCategory, AttributeScore, Attributes, ATTRIBUTE_MAX,
    ATTRIBUTE_MIN, DEFAULT_SCORE, FOURTEEN,
};
pub use dice::{roll_dice, roll_die, DiceFormula, DiceParseError};
pub use skill::{
    is_combat_skill, is_known_skill, SkillFilter, ALL_SKILLS, ANY_COMBAT, ANY_SKILL,
    COMBAT_SKILLS, MAX_SKILL_LEVEL, UNTRAINED_LEVEL,
};
