//! CSV path loader.
//!
//! # CSV format
//!
//! One row per waypoint.  Rows of the same chain are taken in file order;
//! chains are numbered in order of first appearance.
//!
//! ```csv
//! chain,x,y,z,next_chain
//! stage_a,0,0,0,
//! stage_a,100,0,0,
//! stage_a,300,0,0,stage_b
//! stage_b,300,0,0,
//! stage_b,300,200,0,
//! ```
//!
//! **`next_chain`** may be left empty on every row, or carry the successor
//! chain's name on any subset of the chain's rows.  Two different non-empty
//! values for the same chain are a parse error.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use pt_core::Vec3;

use crate::{PathError, PathGraph, PathGraphBuilder, PathResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct WaypointRecord {
    chain:      String,
    x:          f32,
    y:          f32,
    z:          f32,
    next_chain: Option<String>,
}

struct PendingChain {
    name:   String,
    points: Vec<Vec3>,
    next:   Option<String>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`PathGraph`] from a CSV file.
pub fn load_graph_csv(path: &Path) -> PathResult<PathGraph> {
    let file = std::fs::File::open(path)?;
    load_graph_reader(file)
}

/// Like [`load_graph_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or for paths embedded in a
/// binary.
pub fn load_graph_reader<R: Read>(reader: R) -> PathResult<PathGraph> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut pending: Vec<PendingChain> = Vec::new();

    for result in csv_reader.deserialize() {
        let rec: WaypointRecord = result?;
        let next = rec.next_chain.filter(|s| !s.is_empty());

        let idx = match pending.iter().position(|c| c.name == rec.chain) {
            Some(i) => i,
            None => {
                pending.push(PendingChain { name: rec.chain.clone(), points: Vec::new(), next: None });
                pending.len() - 1
            }
        };
        let chain = &mut pending[idx];
        chain.points.push(Vec3::new(rec.x, rec.y, rec.z));

        if let Some(next) = next {
            match &chain.next {
                Some(existing) if *existing != next => {
                    return Err(PathError::Parse(format!(
                        "chain '{}' links to both '{existing}' and '{next}'",
                        chain.name
                    )));
                }
                _ => chain.next = Some(next),
            }
        }
    }

    // ── Assemble ──────────────────────────────────────────────────────────
    let mut builder = PathGraphBuilder::new();
    let mut links = Vec::new();
    for chain in pending {
        let id = builder.add_chain(chain.name, chain.points);
        if let Some(next) = chain.next {
            links.push((id, next));
        }
    }
    for (from, next) in links {
        let to = builder
            .chain_id(&next)
            .ok_or_else(|| PathError::UnknownChain(next.clone()))?;
        builder.link(from, to);
    }

    builder.build()
}
