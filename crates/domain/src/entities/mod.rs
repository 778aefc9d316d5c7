//! Domain entities - the character record and the rule-table records it is built from

mod character;
mod rules;

pub use character::{
    Character, Contact, DerivedStats, FocusEntry, InstalledCyberware, InventoryItem,
    SavingThrows,
};
pub use rules::{
    ArmorRecord, ArmorStats, BackgroundRecord, CyberwarePackage, CyberwareItem, EdgeRecord,
    FocusRecord, GearKit, Grant, ItemKind, Prerequisite, SpecialtyItem, WeaponRecord, WeaponStats,
};
