use std::path::Path;

use mq_core::Catalogs;

pub fn run(output: Option<&Path>) -> Result<(), String> {
    let json = serde_json::to_string_pretty(&Catalogs::standard())
        .map_err(|e| format!("failed to serialize catalog: {e}"))?;

    match output {
        Some(path) => {
            std::fs::write(path, &json)
                .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
            eprintln!("  Wrote catalog to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
