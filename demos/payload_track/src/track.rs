//! The payload route.
//!
//! Three stages on a hilly map: a climb out of the spawn yard, a long
//! downhill street, and a final push up to the delivery point.  Stages are
//! separate chains linked by `next_chain`, the way checkpoints split a real
//! payload map.

use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};

use pt_path::{PathGraph, load_graph_csv, load_graph_reader};

const TRACK_CSV: &str = "\
chain,x,y,z,next_chain
yard,0,0,0,street
yard,120,0,0,street
yard,220,15,40,street
yard,300,30,60,street
street,300,30,60,summit
street,420,20,60,summit
street,560,5,120,summit
street,640,0,200,summit
summit,640,0,200,
summit,700,10,260,
summit,760,25,300,
summit,800,25,380,
";

/// Load the track from `path`, or the built-in route when `path` is `None`.
pub fn load_track(path: Option<&Path>) -> Result<PathGraph> {
    match path {
        Some(p) => load_graph_csv(p).with_context(|| format!("loading track {}", p.display())),
        None => load_graph_reader(Cursor::new(TRACK_CSV)).context("loading built-in track"),
    }
}
