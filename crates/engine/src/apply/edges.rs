use charforge_domain::{Character, RuleBook};

use super::execute_grants;
use crate::error::BuildError;
use crate::pending::Resolution;

/// Apply an edge by exact name.
///
/// The edge is recorded even if the character already has it; this layer does
/// not suppress repeats.
pub fn apply_edge(
    character: &mut Character,
    rules: &RuleBook,
    name: &str,
) -> Result<Resolution, BuildError> {
    let edge = rules
        .edge(name)
        .ok_or_else(|| BuildError::unknown("edge", name))?;

    character.edges.push(edge.name.clone());
    let pending = execute_grants(character, rules, &edge.name, &edge.grants)?;

    tracing::info!(edge = %edge.name, pending = pending.len(), "Applied edge");
    Ok(Resolution::from_pending(pending))
}
