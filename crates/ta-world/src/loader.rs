//! CSV entity loader.
//!
//! # CSV format
//!
//! One row per entity.  Rows are assigned `EntityId`s in file order.
//!
//! ```csv
//! name,kind,location,behaviors
//! hall,room,,
//! lamp,item,hall,game/lamp core/light
//! troll,npc,hall,core/npc
//! ```
//!
//! | Column      | Meaning                                                  |
//! |-------------|----------------------------------------------------------|
//! | `name`      | Unique entity name                                       |
//! | `kind`      | Entity type tested by handlers                           |
//! | `location`  | Name of the containing entity; empty for top-level       |
//! | `behaviors` | Space-separated module ids, highest precedence first     |

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use ta_core::ModuleId;

use crate::{EntitySpec, WorldError, WorldResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct EntityRecord {
    name:      String,
    kind:      String,
    #[serde(default)]
    location:  String,
    #[serde(default)]
    behaviors: String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load entity specs from a CSV file.
pub fn load_entities_csv(path: &Path) -> WorldResult<Vec<EntitySpec>> {
    let file = std::fs::File::open(path).map_err(WorldError::Io)?;
    load_entities_reader(file)
}

/// Like [`load_entities_csv`] but accepts any `Read` source.
pub fn load_entities_reader<R: Read>(reader: R) -> WorldResult<Vec<EntitySpec>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .deserialize::<EntityRecord>()
        .map(|result| {
            let row = result.map_err(|e| WorldError::Parse(e.to_string()))?;
            to_spec(row)
        })
        .collect()
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn to_spec(row: EntityRecord) -> WorldResult<EntitySpec> {
    if row.name.is_empty() {
        return Err(WorldError::Parse("entity name must not be empty".to_owned()));
    }
    if row.kind.is_empty() {
        return Err(WorldError::Parse(format!("entity {:?} has no kind", row.name)));
    }
    Ok(EntitySpec {
        name:      row.name,
        kind:      row.kind,
        location:  (!row.location.is_empty()).then_some(row.location),
        behaviors: row.behaviors.split_whitespace().map(ModuleId::from).collect(),
    })
}
