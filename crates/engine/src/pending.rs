//! Pending items - deferred choices a rule application hands back to the caller.
//!
//! A pending item is created by an apply call, consumed by exactly one resolve
//! call, and may be replaced by further items. The caller owns the queue and
//! resolves strictly from its head; spawned items go to the front.

use std::collections::VecDeque;

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use charforge_domain::{Attribute, Character, RuleBook, SkillFilter};

use crate::resolve::skillplug_cost;
use crate::skill_ledger;

// =============================================================================
// Pending Items
// =============================================================================

/// Wire names of the kinds this engine resolves.
pub const KNOWN_KINDS: [&str; 6] = [
    "pickSkill",
    "pickFocus",
    "pickAttribute",
    "addContact",
    "pickCyberwarePackage",
    "pickSkillplugs",
];

/// A request for caller input, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(remote = "Self", tag = "kind", rename_all = "camelCase")]
pub enum PendingItem {
    /// Pick one skill admitted by `category`, restricted to `options` when non-empty.
    PickSkill {
        #[serde(default)]
        category: SkillFilter,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        options: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
    /// Pick one focus the character does not hold yet.
    PickFocus {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        options: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
    /// Pick one attribute to set to `target`.
    PickAttribute {
        target: i32,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        exclude: Vec<Attribute>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
    /// Name a contact; the relationship comes from the granting rule.
    AddContact {
        relationship: String,
        #[serde(default)]
        context: String,
    },
    /// Pick a cyberware package to install.
    PickCyberwarePackage {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        options: Vec<String>,
    },
    /// Pick skillplug skills whose total cost fits `budget`.
    PickSkillplugs { budget: u32 },
    /// A kind this engine does not know, kept with its wire tag; always
    /// rejected on resolution.
    #[serde(skip)]
    Unrecognized { kind: String },
}

impl Serialize for PendingItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unrecognized { kind } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("kind", kind)?;
                map.end()
            }
            known => PendingItem::serialize(known, serializer),
        }
    }
}

impl<'de> Deserialize<'de> for PendingItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let kind = value
            .get("kind")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string);
        match kind {
            Some(kind) if !KNOWN_KINDS.contains(&kind.as_str()) => {
                Ok(Self::Unrecognized { kind })
            }
            _ => PendingItem::deserialize(value).map_err(D::Error::custom),
        }
    }
}

impl PendingItem {
    /// Wire name of this item's kind.
    pub fn kind(&self) -> &str {
        match self {
            Self::PickSkill { .. } => "pickSkill",
            Self::PickFocus { .. } => "pickFocus",
            Self::PickAttribute { .. } => "pickAttribute",
            Self::AddContact { .. } => "addContact",
            Self::PickCyberwarePackage { .. } => "pickCyberwarePackage",
            Self::PickSkillplugs { .. } => "pickSkillplugs",
            Self::Unrecognized { kind } => kind.as_str(),
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::PickSkill { reason, .. }
            | Self::PickFocus { reason, .. }
            | Self::PickAttribute { reason, .. } => reason.as_deref(),
            _ => None,
        }
    }

    /// Answers a selectable-list UI may offer for this item.
    ///
    /// Empty for `addContact`, which takes a free-text name.
    pub fn candidates(&self, character: &Character, rules: &RuleBook) -> Vec<String> {
        match self {
            Self::PickSkill {
                category, options, ..
            } => {
                let open = |skill: &str| {
                    category.admits(skill) && skill_ledger::validate(character, skill).valid
                };
                if options.is_empty() {
                    category
                        .skills()
                        .filter(|s| open(*s))
                        .map(String::from)
                        .collect()
                } else {
                    options.iter().filter(|s| open(s.as_str())).cloned().collect()
                }
            }
            Self::PickFocus { options, .. } => {
                let names: Vec<&str> = if options.is_empty() {
                    rules.foci().iter().map(|f| f.name.as_str()).collect()
                } else {
                    options.iter().map(String::as_str).collect()
                };
                names
                    .into_iter()
                    .filter(|f| !character.has_focus(f))
                    .map(String::from)
                    .collect()
            }
            Self::PickAttribute { exclude, .. } => Attribute::ALL
                .into_iter()
                .filter(|a| !exclude.contains(a))
                .map(|a| a.name().to_string())
                .collect(),
            Self::AddContact { .. } | Self::Unrecognized { .. } => Vec::new(),
            Self::PickCyberwarePackage { .. } if character.cyberware_package.is_some() => {
                Vec::new()
            }
            Self::PickCyberwarePackage { options } => {
                if options.is_empty() {
                    rules
                        .cyberware_packages()
                        .iter()
                        .map(|p| p.name.clone())
                        .collect()
                } else {
                    options.clone()
                }
            }
            Self::PickSkillplugs { budget } => SkillFilter::Any
                .skills()
                .filter(|s| skillplug_cost(s).is_some_and(|cost| cost <= *budget))
                .map(String::from)
                .collect(),
        }
    }
}

// =============================================================================
// Choices and Outcomes
// =============================================================================

/// A caller-supplied answer to a pending item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PendingChoice {
    One(String),
    Many(Vec<String>),
}

impl PendingChoice {
    /// The single answer, for kinds that take exactly one.
    pub fn single(&self) -> Option<&str> {
        match self {
            Self::One(value) => Some(value.as_str()),
            Self::Many(values) if values.len() == 1 => Some(values[0].as_str()),
            Self::Many(_) => None,
        }
    }

    /// All answers; a single answer is a one-element list.
    pub fn values(&self) -> Vec<&str> {
        match self {
            Self::One(value) => vec![value.as_str()],
            Self::Many(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

impl std::fmt::Display for PendingChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::One(value) => f.write_str(value),
            Self::Many(values) => f.write_str(&values.join(", ")),
        }
    }
}

impl From<&str> for PendingChoice {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<String> for PendingChoice {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<Vec<String>> for PendingChoice {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

impl From<&[&str]> for PendingChoice {
    fn from(values: &[&str]) -> Self {
        Self::Many(values.iter().map(|v| v.to_string()).collect())
    }
}

/// Outcome of an apply or resolve call that did not fail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "pending", rename_all = "camelCase")]
pub enum Resolution {
    /// The choice took full effect.
    #[default]
    Applied,
    /// The choice took effect and needs further answers, in this order.
    Spawned(Vec<PendingItem>),
}

impl Resolution {
    pub fn from_pending(items: Vec<PendingItem>) -> Self {
        if items.is_empty() {
            Self::Applied
        } else {
            Self::Spawned(items)
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    pub fn pending(&self) -> &[PendingItem] {
        match self {
            Self::Applied => &[],
            Self::Spawned(items) => items,
        }
    }

    pub fn into_pending(self) -> Vec<PendingItem> {
        match self {
            Self::Applied => Vec::new(),
            Self::Spawned(items) => items,
        }
    }
}

// =============================================================================
// Queue
// =============================================================================

/// Caller-owned queue of outstanding pending items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingQueue {
    items: VecDeque<PendingItem>,
}

impl PendingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append items produced by a top-level apply call.
    pub fn enqueue(&mut self, items: impl IntoIterator<Item = PendingItem>) {
        self.items.extend(items);
    }

    /// Put items spawned by a resolution ahead of everything already queued,
    /// keeping their relative order.
    pub fn prepend(&mut self, items: Vec<PendingItem>) {
        for item in items.into_iter().rev() {
            self.items.push_front(item);
        }
    }

    pub fn peek(&self) -> Option<&PendingItem> {
        self.items.front()
    }

    pub fn pop(&mut self) -> Option<PendingItem> {
        self.items.pop_front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingItem> {
        self.items.iter()
    }
}
