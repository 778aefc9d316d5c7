//! Offer sampler - draft menus of backgrounds, edges and foci.
//!
//! Each offer draws without replacement from the entries the character does
//! not already have, and shrinks to the pool when fewer remain than asked for.

use rand::seq::SliceRandom;
use rand::Rng;

use charforge_domain::{BackgroundRecord, Character, EdgeRecord, FocusRecord, RuleBook};

fn draw<'a, T, R: Rng + ?Sized>(
    pool: &'a [T],
    count: usize,
    rng: &mut R,
    excluded: impl Fn(&T) -> bool,
) -> Vec<&'a T> {
    let open: Vec<&T> = pool.iter().filter(|entry| !excluded(*entry)).collect();
    open.choose_multiple(rng, count).copied().collect()
}

pub fn offer_backgrounds<'a, R: Rng + ?Sized>(
    character: &Character,
    rules: &'a RuleBook,
    count: usize,
    rng: &mut R,
) -> Vec<&'a BackgroundRecord> {
    let current = character.background.as_deref().map(str::to_lowercase);
    draw(rules.backgrounds(), count, rng, |b| {
        current.as_deref() == Some(b.name.to_lowercase().as_str())
    })
}

pub fn offer_edges<'a, R: Rng + ?Sized>(
    character: &Character,
    rules: &'a RuleBook,
    count: usize,
    rng: &mut R,
) -> Vec<&'a EdgeRecord> {
    draw(rules.edges(), count, rng, |e| character.has_edge(&e.name))
}

pub fn offer_foci<'a, R: Rng + ?Sized>(
    character: &Character,
    rules: &'a RuleBook,
    count: usize,
    rng: &mut R,
) -> Vec<&'a FocusRecord> {
    draw(rules.foci(), count, rng, |f| character.has_focus(&f.name))
}
