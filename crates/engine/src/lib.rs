//! charforge Engine library.
//!
//! Applies creation choices to a character and manages the queue of deferred
//! choices those applications produce.
//!
//! ## Structure
//!
//! - `skill_ledger` - the two-level skill cap and redirect signal
//! - `apply/` - edges, foci, backgrounds, growth and learning rolls
//! - `pending` / `resolve` - pending items, the caller's queue and the dispatcher
//! - `attributes`, `derived`, `combat`, `offers`, `gear`, `contacts` - the
//!   remaining creation steps
//! - `builder` - a session that enforces queue ordering over all of the above

pub mod apply;
pub mod attributes;
pub mod builder;
pub mod combat;
pub mod contacts;
pub mod derived;
pub mod error;
pub mod gear;
pub mod offers;
pub mod pending;
pub mod resolve;
pub mod skill_ledger;

pub use apply::{
    apply_background, apply_edge, apply_focus, resolve_growth_roll, resolve_learning_pick,
    roll_growth, roll_learning, BackgroundOutcome, GrowthChoices,
};
pub use builder::CharacterBuilder;
pub use combat::{calculate_ac, character_armor_class, resolve_weapon, ArmorClass, WeaponAttack};
pub use derived::calculate_derived_stats;
pub use error::BuildError;
pub use pending::{PendingChoice, PendingItem, PendingQueue, Resolution};
pub use resolve::resolve_pending;
