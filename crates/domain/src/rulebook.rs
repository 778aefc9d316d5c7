//! RuleBook - the read-only rule tables a build session consults.
//!
//! Tables are loaded once, either from the JSON bundled with this crate or from
//! a directory holding the same five files, and are only ever read afterwards.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;

use crate::entities::{
    ArmorRecord, BackgroundRecord, CyberwarePackage, EdgeRecord, FocusRecord, GearKit,
    SpecialtyItem, WeaponRecord,
};
use crate::error::DomainError;

pub const EDGES_FILE: &str = "edges.json";
pub const FOCI_FILE: &str = "foci.json";
pub const BACKGROUNDS_FILE: &str = "backgrounds.json";
pub const CYBERWARE_FILE: &str = "cyberware.json";
pub const GEAR_FILE: &str = "gear.json";

const BUILTIN_EDGES: &str = include_str!("../data/edges.json");
const BUILTIN_FOCI: &str = include_str!("../data/foci.json");
const BUILTIN_BACKGROUNDS: &str = include_str!("../data/backgrounds.json");
const BUILTIN_CYBERWARE: &str = include_str!("../data/cyberware.json");
const BUILTIN_GEAR: &str = include_str!("../data/gear.json");

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GearTables {
    weapons: Vec<WeaponRecord>,
    armor: Vec<ArmorRecord>,
    #[serde(default)]
    shields: Vec<String>,
    kits: Vec<GearKit>,
    #[serde(default)]
    specialty_items: Vec<SpecialtyItem>,
}

/// All rule tables, indexed by name.
#[derive(Debug, Clone)]
pub struct RuleBook {
    edges: Vec<EdgeRecord>,
    foci: Vec<FocusRecord>,
    backgrounds: Vec<BackgroundRecord>,
    cyberware: Vec<CyberwarePackage>,
    weapons: Vec<WeaponRecord>,
    armor: Vec<ArmorRecord>,
    shields: Vec<String>,
    kits: Vec<GearKit>,
    specialty_items: Vec<SpecialtyItem>,
}

impl RuleBook {
    /// Tables bundled with the crate.
    pub fn builtin() -> Result<Self, DomainError> {
        Self::from_sources(
            BUILTIN_EDGES,
            BUILTIN_FOCI,
            BUILTIN_BACKGROUNDS,
            BUILTIN_CYBERWARE,
            BUILTIN_GEAR,
        )
    }

    /// Load the five table files from `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, DomainError> {
        let dir = dir.as_ref();
        let read = |file: &str| {
            let path = dir.join(file);
            std::fs::read_to_string(&path)
                .map_err(|e| DomainError::load(format!("{}: {}", path.display(), e)))
        };

        Self::from_sources(
            &read(EDGES_FILE)?,
            &read(FOCI_FILE)?,
            &read(BACKGROUNDS_FILE)?,
            &read(CYBERWARE_FILE)?,
            &read(GEAR_FILE)?,
        )
    }

    fn from_sources(
        edges: &str,
        foci: &str,
        backgrounds: &str,
        cyberware: &str,
        gear: &str,
    ) -> Result<Self, DomainError> {
        let gear: GearTables = decode(GEAR_FILE, gear)?;
        Ok(Self {
            edges: decode(EDGES_FILE, edges)?,
            foci: decode(FOCI_FILE, foci)?,
            backgrounds: decode(BACKGROUNDS_FILE, backgrounds)?,
            cyberware: decode(CYBERWARE_FILE, cyberware)?,
            weapons: gear.weapons,
            armor: gear.armor,
            shields: gear.shields,
            kits: gear.kits,
            specialty_items: gear.specialty_items,
        })
    }

    // =========================================================================
    // Whole tables
    // =========================================================================

    pub fn edges(&self) -> &[EdgeRecord] {
        &self.edges
    }

    pub fn foci(&self) -> &[FocusRecord] {
        &self.foci
    }

    pub fn backgrounds(&self) -> &[BackgroundRecord] {
        &self.backgrounds
    }

    pub fn cyberware_packages(&self) -> &[CyberwarePackage] {
        &self.cyberware
    }

    pub fn kits(&self) -> &[GearKit] {
        &self.kits
    }

    pub fn specialty_items(&self) -> &[SpecialtyItem] {
        &self.specialty_items
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    pub fn edge(&self, name: &str) -> Option<&EdgeRecord> {
        self.edges.iter().find(|e| e.name == name)
    }

    pub fn focus(&self, name: &str) -> Option<&FocusRecord> {
        self.foci.iter().find(|f| f.name == name)
    }

    /// Backgrounds match on trimmed, case-insensitive name.
    pub fn background(&self, name: &str) -> Option<&BackgroundRecord> {
        let wanted = name.trim().to_lowercase();
        self.backgrounds
            .iter()
            .find(|b| b.name.to_lowercase() == wanted)
    }

    pub fn cyberware_package(&self, name: &str) -> Option<&CyberwarePackage> {
        self.cyberware.iter().find(|p| p.name == name)
    }

    pub fn weapon(&self, name: &str) -> Option<&WeaponRecord> {
        self.weapons.iter().find(|w| w.name == name)
    }

    pub fn armor(&self, name: &str) -> Option<&ArmorRecord> {
        self.armor.iter().find(|a| a.name == name)
    }

    pub fn is_shield(&self, name: &str) -> bool {
        self.shields.iter().any(|s| s == name)
    }

    pub fn kit(&self, name: &str) -> Option<&GearKit> {
        self.kits.iter().find(|k| k.name == name)
    }

    pub fn specialty_item(&self, name: &str) -> Option<&SpecialtyItem> {
        self.specialty_items.iter().find(|s| s.name == name)
    }
}

fn decode<T: DeserializeOwned>(file: &str, source: &str) -> Result<T, DomainError> {
    serde_json::from_str(source).map_err(|e| DomainError::load(format!("{}: {}", file, e)))
}
