//! CharacterBuilder - one build session over one character.
//!
//! The builder owns the character, the pending queue and the random source.
//! Top-level rule applications are refused while any pending item is
//! outstanding; items are resolved strictly from the head of the queue.

use rand::Rng;

use charforge_domain::{
    Attribute, BackgroundRecord, Character, EdgeRecord, FocusRecord, RuleBook, SpecialtyItem,
};

use crate::apply::{self, BackgroundOutcome, GrowthChoices};
use crate::attributes;
use crate::combat::{self, ArmorClass, WeaponAttack};
use crate::contacts;
use crate::derived;
use crate::error::BuildError;
use crate::gear;
use crate::offers;
use crate::pending::{PendingChoice, PendingItem, PendingQueue, Resolution};
use crate::resolve::resolve_pending;

pub struct CharacterBuilder<'r, R: Rng> {
    rules: &'r RuleBook,
    rng: R,
    character: Character,
    queue: PendingQueue,
}

impl<'r, R: Rng> CharacterBuilder<'r, R> {
    pub fn new(rules: &'r RuleBook, rng: R) -> Self {
        Self::with_character(rules, rng, Character::new())
    }

    /// Continue a session on an existing character.
    pub fn with_character(rules: &'r RuleBook, rng: R, character: Character) -> Self {
        Self {
            rules,
            rng,
            character,
            queue: PendingQueue::new(),
        }
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn rules(&self) -> &'r RuleBook {
        self.rules
    }

    pub fn pending(&self) -> &PendingQueue {
        &self.queue
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    fn ensure_settled(&self) -> Result<(), BuildError> {
        if self.queue.is_empty() {
            Ok(())
        } else {
            Err(BuildError::PendingOutstanding {
                count: self.queue.len(),
            })
        }
    }

    fn enqueue(&mut self, resolution: &Resolution) {
        self.queue.enqueue(resolution.pending().iter().cloned());
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    pub fn roll_attributes(&mut self) -> Result<[i32; 6], BuildError> {
        self.ensure_settled()?;
        Ok(attributes::roll_attributes(&mut self.character, &mut self.rng))
    }

    pub fn replace_with_fourteen(&mut self, attribute: Attribute) -> Result<i32, BuildError> {
        self.ensure_settled()?;
        Ok(attributes::replace_with_fourteen(&mut self.character, attribute))
    }

    pub fn assign_array(&mut self, order: &[Attribute]) -> Result<(), BuildError> {
        self.ensure_settled()?;
        attributes::assign_array(&mut self.character, order)
    }

    pub fn roll_bonus_attribute(&mut self, amount: i32) -> Result<Option<(Attribute, i32)>, BuildError> {
        self.ensure_settled()?;
        Ok(attributes::roll_bonus_attribute(
            &mut self.character,
            &mut self.rng,
            amount,
        ))
    }

    // =========================================================================
    // Background, growth and learning
    // =========================================================================

    pub fn apply_background(&mut self, name: &str) -> Result<BackgroundOutcome, BuildError> {
        self.ensure_settled()?;
        let outcome = apply::apply_background(&mut self.character, self.rules, name)?;
        self.enqueue(&outcome.resolution);
        Ok(outcome)
    }

    fn current_background(&self) -> Result<&'r BackgroundRecord, BuildError> {
        let name = self.character.background.as_deref().ok_or_else(|| {
            BuildError::invalid_option("background", "no background has been applied")
        })?;
        self.rules
            .background(name)
            .ok_or_else(|| BuildError::unknown("background", name))
    }

    /// Roll on the current background's growth table.
    pub fn roll_growth(&mut self) -> Result<(u8, String), BuildError> {
        let background = self.current_background()?;
        apply::roll_growth(background, &mut self.rng)
    }

    /// Roll on the current background's learning table.
    pub fn roll_learning(&mut self) -> Result<(u8, String), BuildError> {
        let background = self.current_background()?;
        apply::roll_learning(background, &mut self.rng)
    }

    pub fn resolve_growth(&mut self, entry: &str, choices: &GrowthChoices) -> Result<(), BuildError> {
        self.ensure_settled()?;
        apply::resolve_growth_roll(&mut self.character, entry, choices)
    }

    pub fn resolve_learning(&mut self, skill: &str) -> Result<u8, BuildError> {
        self.ensure_settled()?;
        apply::resolve_learning_pick(&mut self.character, skill)
    }

    // =========================================================================
    // Edges and foci
    // =========================================================================

    pub fn offer_backgrounds(&mut self, count: usize) -> Vec<&'r BackgroundRecord> {
        offers::offer_backgrounds(&self.character, self.rules, count, &mut self.rng)
    }

    pub fn offer_edges(&mut self, count: usize) -> Vec<&'r EdgeRecord> {
        offers::offer_edges(&self.character, self.rules, count, &mut self.rng)
    }

    pub fn offer_foci(&mut self, count: usize) -> Vec<&'r FocusRecord> {
        offers::offer_foci(&self.character, self.rules, count, &mut self.rng)
    }

    pub fn apply_edge(&mut self, name: &str) -> Result<Resolution, BuildError> {
        self.ensure_settled()?;
        let resolution = apply::apply_edge(&mut self.character, self.rules, name)?;
        self.enqueue(&resolution);
        Ok(resolution)
    }

    pub fn apply_focus(&mut self, name: &str) -> Result<Resolution, BuildError> {
        self.ensure_settled()?;
        let resolution = apply::apply_focus(&mut self.character, self.rules, name, 1)?;
        self.enqueue(&resolution);
        Ok(resolution)
    }

    // =========================================================================
    // Pending items
    // =========================================================================

    pub fn next_pending(&self) -> Option<&PendingItem> {
        self.queue.peek()
    }

    /// Answers a UI may offer for the head of the queue.
    pub fn candidates(&self) -> Vec<String> {
        self.queue
            .peek()
            .map(|item| item.candidates(&self.character, self.rules))
            .unwrap_or_default()
    }

    /// Resolve the head of the queue. On error the item stays queued.
    pub fn resolve_next(&mut self, choice: impl Into<PendingChoice>) -> Result<Resolution, BuildError> {
        let choice = choice.into();
        let item = self.queue.peek().ok_or(BuildError::NothingPending)?;
        let resolution = resolve_pending(&mut self.character, self.rules, item, &choice)?;

        self.queue.pop();
        self.queue.prepend(resolution.pending().to_vec());
        Ok(resolution)
    }

    // =========================================================================
    // Contacts, gear and combat
    // =========================================================================

    pub fn add_contact(
        &mut self,
        name: &str,
        relationship: &str,
        context: &str,
    ) -> Result<(), BuildError> {
        self.ensure_settled()?;
        contacts::add_contact(&mut self.character, name, relationship, context)
    }

    pub fn equip_kit(&mut self, kit: &str) -> Result<usize, BuildError> {
        self.ensure_settled()?;
        gear::equip_kit(&mut self.character, self.rules, kit)
    }

    pub fn eligible_specialty_items(&self) -> Vec<&'r SpecialtyItem> {
        gear::eligible_specialty_items(&self.character, self.rules)
    }

    pub fn equip_specialty(&mut self, name: &str) -> Result<(), BuildError> {
        self.ensure_settled()?;
        gear::equip_specialty(&mut self.character, self.rules, name)
    }

    pub fn armor_class(&self) -> ArmorClass {
        combat::character_armor_class(&self.character)
    }

    pub fn weapon_attack(&self, weapon: &str) -> Result<WeaponAttack, BuildError> {
        combat::resolve_weapon(&self.character, self.rules, weapon)
    }

    // =========================================================================
    // Completion
    // =========================================================================

    /// Compute derived stats and return the finished character.
    pub fn finish(&mut self) -> Result<Character, BuildError> {
        self.ensure_settled()?;
        derived::calculate_derived_stats(&mut self.character);
        tracing::info!(
            name = %self.character.name,
            background = ?self.character.background,
            edges = self.character.edges.len(),
            foci = self.character.foci.len(),
            "Character complete"
        );
        Ok(self.character.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rules() -> RuleBook {
        RuleBook::builtin().expect("bundled tables parse")
    }

    #[test]
    fn outstanding_items_block_new_applications() {
        let rules = rules();
        let mut builder = CharacterBuilder::new(&rules, StdRng::seed_from_u64(1));
        builder.apply_edge("On Target").expect("known edge");

        let err = builder.apply_edge("Ghost").expect_err("pick outstanding");
        assert!(matches!(err, BuildError::PendingOutstanding { count: 1 }));
        assert!(builder.finish().is_err());

        builder.resolve_next("Shoot").expect("combat skill");
        builder.apply_edge("Ghost").expect("queue empty");
        let character = builder.finish().expect("settled");
        assert_eq!(character.derived.bab, 1);
    }

    #[test]
    fn failed_resolution_keeps_item_queued() {
        let rules = rules();
        let mut builder = CharacterBuilder::new(&rules, StdRng::seed_from_u64(2));
        builder.apply_edge("On Target").expect("known edge");

        assert!(builder.resolve_next("Talk").is_err());
        assert_eq!(builder.pending().len(), 1);
        assert_eq!(builder.candidates(), ["Punch", "Shoot", "Stab"]);
    }

    #[test]
    fn spawned_items_jump_the_queue() {
        let rules = rules();
        let mut builder = CharacterBuilder::new(&rules, StdRng::seed_from_u64(3));
        builder.apply_edge("Wired").expect("known edge");
        builder.queue.enqueue([PendingItem::AddContact {
            relationship: "fixer".to_string(),
            context: "sells the plugs".to_string(),
        }]);

        builder.resolve_next("Skillwire Rig").expect("known package");
        let kinds: Vec<_> = builder.pending().iter().map(|item| item.kind()).collect();
        assert_eq!(kinds, ["pickSkillplugs", "addContact"]);
        assert!(matches!(
            builder.next_pending(),
            Some(PendingItem::PickSkillplugs { budget: 3 })
        ));

        builder
            .resolve_next(vec!["Program".to_string(), "Drive".to_string()])
            .expect("cost 2");
        assert!(matches!(
            builder.next_pending(),
            Some(PendingItem::AddContact { .. })
        ));
        builder.resolve_next("Jax").expect("named");
        assert!(builder.pending().is_empty());
    }

    #[test]
    fn second_package_grant_queues_nothing() {
        let rules = rules();
        let mut builder = CharacterBuilder::new(&rules, StdRng::seed_from_u64(6));
        builder.apply_edge("Wired").expect("known edge");
        builder.resolve_next("Infiltrator").expect("known package");

        let resolution = builder.apply_edge("Wired").expect("edge may repeat");
        assert!(resolution.is_applied());
        assert!(builder.pending().is_empty());
        let character = builder.finish().expect("nothing stuck");
        assert_eq!(
            character.cyberware_package.map(|p| p.name).as_deref(),
            Some("Infiltrator")
        );
    }

    #[test]
    fn package_pick_offers_nothing_once_installed() {
        let rules = rules();
        let mut builder = CharacterBuilder::new(&rules, StdRng::seed_from_u64(7));
        builder.apply_edge("Wired").expect("known edge");
        builder.resolve_next("Techie").expect("known package");

        builder
            .queue
            .enqueue([PendingItem::PickCyberwarePackage { options: vec![] }]);
        assert!(builder.candidates().is_empty());
    }

    #[test]
    fn attribute_pick_skipped_when_all_at_target() {
        let rules = rules();
        let mut character = Character::new();
        for attribute in Attribute::ALL {
            character.attributes.set_score(attribute, 18);
        }
        let mut builder =
            CharacterBuilder::with_character(&rules, StdRng::seed_from_u64(8), character);

        let resolution = builder.apply_edge("Prodigy").expect("known edge");
        assert!(resolution.is_applied());
        assert!(builder.pending().is_empty());
        assert!(builder.finish().is_ok());
    }

    #[test]
    fn nothing_to_resolve() {
        let rules = rules();
        let mut builder = CharacterBuilder::new(&rules, StdRng::seed_from_u64(4));
        assert!(matches!(
            builder.resolve_next("anything"),
            Err(BuildError::NothingPending)
        ));
    }

    #[test]
    fn growth_rolls_need_a_background() {
        let rules = rules();
        let mut builder = CharacterBuilder::new(&rules, StdRng::seed_from_u64(5));
        assert!(builder.roll_growth().is_err());
        builder.apply_background("Technician").expect("known");
        let (face, _) = builder.roll_growth().expect("background set");
        assert!((1..=6).contains(&face));
    }
}
