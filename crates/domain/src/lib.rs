//! charforge domain - the character record, its value objects and the rule tables.

pub mod entities;
pub mod error;
pub mod rulebook;
pub mod value_objects;

pub use entities::{
    ArmorRecord, ArmorStats, BackgroundRecord, Character, Contact, CyberwareItem,
    CyberwarePackage, DerivedStats, EdgeRecord, FocusEntry, FocusRecord, GearKit, Grant,
    InstalledCyberware, InventoryItem, ItemKind, Prerequisite, SavingThrows, SpecialtyItem,
    WeaponRecord, WeaponStats,
};
pub use error::DomainError;
pub use rulebook::RuleBook;
pub use value_objects::{
    modifier_for_score, roll_dice, roll_die, Attribute, AttributeCategory, AttributeScore,
    Attributes, DiceFormula, DiceParseError, SkillFilter,
};
