use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

pub fn run(catalog: Option<&Path>) -> Result<(), String> {
    let catalogs = super::load_catalogs(catalog)?;
    let graph = catalogs.layout.build().map_err(|e| e.to_string())?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Room", "Visibility", "Connects to"]);

    for room in graph.rooms() {
        let visibility = if room.blind_spot { "blind spot" } else { "visible" };
        let connections: Vec<String> = room.connections().iter().map(|r| r.to_string()).collect();
        table.add_row(vec![
            room.name.clone(),
            visibility.to_string(),
            connections.join(", "),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} {}", "Home room:".bold(), graph.home());
    Ok(())
}
