use charforge_domain::{Character, Contact};

use crate::error::BuildError;

/// Append a contact. Names are trimmed and must not be empty.
pub fn add_contact(
    character: &mut Character,
    name: &str,
    relationship: &str,
    context: &str,
) -> Result<(), BuildError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(BuildError::invalid_option(name, "contact name is empty"));
    }

    character.contacts.push(Contact {
        name: name.to_string(),
        relationship: relationship.to_string(),
        context: context.to_string(),
    });
    tracing::debug!(contact = %name, relationship = %relationship, "Added contact");
    Ok(())
}
