use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use mq_core::Abilities;

pub fn run(catalog: Option<&Path>) -> Result<(), String> {
    let catalogs = super::load_catalogs(catalog)?;

    if catalogs.roles.is_empty() {
        println!("  No roles found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Role", "Influence", "Movement", "Abilities", "Description"]);

    for role in catalogs.roles.roles() {
        table.add_row(vec![
            role.name.clone(),
            role.influence.to_string(),
            role.movement.to_string(),
            describe_abilities(&role.abilities),
            role.description.clone(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} roles", catalogs.roles.len());
    Ok(())
}

fn describe_abilities(abilities: &Abilities) -> String {
    let mut parts = Vec::new();
    if abilities.copies_traits {
        parts.push("copies traits".to_string());
    }
    if abilities.always_lies {
        parts.push("always lies".to_string());
    }
    if abilities.blocks_interaction {
        parts.push("blocks questions".to_string());
    }
    if abilities.can_force_swap {
        parts.push("forces swaps".to_string());
    }
    if let Some(mask) = abilities.fixed_starting_mask {
        parts.push(format!("always wears {mask}"));
    }
    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join(", ")
    }
}
