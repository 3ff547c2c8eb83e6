pub mod catalog;
pub mod roles;
pub mod rooms;
pub mod simulate;

use std::path::Path;

use mq_core::Catalogs;

/// Load catalogs from `path`, or the built-in set when none is given.
fn load_catalogs(path: Option<&Path>) -> Result<Catalogs, String> {
    match path {
        Some(path) => Catalogs::load(path).map_err(|e| e.to_string()),
        None => Ok(Catalogs::standard()),
    }
}
