//! Unit tests for pt-path.

use pt_core::{ChainId, NodeId, Vec3};

use crate::{PathGraph, PathGraphBuilder};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// 0 → 100 → 300 along +X.
fn line_graph() -> (PathGraph, ChainId) {
    let mut b = PathGraphBuilder::new();
    let c = b.add_chain(
        "main",
        [Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0), Vec3::new(300.0, 0.0, 0.0)],
    );
    (b.build().unwrap(), c)
}

#[cfg(test)]
mod builder {
    use super::*;
    use crate::PathError;

    #[test]
    fn links_are_derived_from_chain_order() {
        let (g, c) = line_graph();
        let chain = g.chain(c);
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.segment_count(), 2);

        let n0 = g.chain_node(c, 0);
        let n1 = g.chain_node(c, 1);
        let n2 = g.chain_node(c, 2);
        assert_eq!(n0.prev, None);
        assert_eq!(n0.next, Some(n1.id));
        assert_eq!(n1.prev, Some(n0.id));
        assert_eq!(n2.next, None);
        assert!(n2.is_terminal());
        assert_eq!(n2.next_chain, None);
    }

    #[test]
    fn segment_lengths_precomputed() {
        let (g, c) = line_graph();
        let chain = g.chain(c);
        assert_eq!(chain.segment_length(0), 100.0);
        assert_eq!(chain.segment_length(1), 200.0);
        assert_eq!(chain.total_length(), 300.0);
        assert_eq!(chain.distance_at(1, 0.5), 200.0);
        assert_eq!(chain.distance_at(2, 0.0), 300.0);
    }

    #[test]
    fn successor_recorded_on_terminal_node_only() {
        let mut b = PathGraphBuilder::new();
        let a = b.add_chain("a", [Vec3::ZERO, Vec3::X]);
        let c = b.add_chain("b", [Vec3::X, Vec3::new(2.0, 0.0, 0.0), Vec3::new(3.0, 0.0, 0.0)]);
        b.link(a, c);
        let g = b.build().unwrap();

        assert_eq!(g.chain(a).successor, Some(c));
        assert_eq!(g.chain_node(a, 0).next_chain, None);
        assert_eq!(g.chain_node(a, 1).next_chain, Some(c));
        assert_eq!(g.chain(c).successor, None);
        // Arena ids are contiguous across chains.
        assert_eq!(g.chain(c).node_id(0), NodeId(2));
    }

    #[test]
    fn self_link_is_allowed() {
        let mut b = PathGraphBuilder::new();
        let a = b.add_chain("loop", [Vec3::ZERO, Vec3::X, Vec3::Y]);
        b.link(a, a);
        let g = b.build().unwrap();
        assert_eq!(g.chain(a).successor, Some(a));
    }

    #[test]
    fn empty_chain_rejected() {
        let mut b = PathGraphBuilder::new();
        b.add_chain("empty", []);
        assert!(matches!(b.build(), Err(PathError::EmptyChain(name)) if name == "empty"));
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut b = PathGraphBuilder::new();
        b.add_chain("a", [Vec3::ZERO]);
        b.add_chain("a", [Vec3::X]);
        assert!(matches!(b.build(), Err(PathError::DuplicateChain(_))));
    }

    #[test]
    fn dangling_successor_rejected() {
        let mut b = PathGraphBuilder::new();
        let a = b.add_chain("a", [Vec3::ZERO, Vec3::X]);
        b.link(a, ChainId(9));
        assert!(matches!(b.build(), Err(PathError::UnknownChain(_))));
    }

    #[test]
    fn non_finite_position_rejected() {
        let mut b = PathGraphBuilder::new();
        b.add_chain("a", [Vec3::ZERO, Vec3::new(f32::NAN, 0.0, 0.0)]);
        assert!(matches!(
            b.build(),
            Err(PathError::InvalidPosition { index: 1, .. })
        ));
    }

    #[test]
    fn lookup_by_name() {
        let (g, c) = line_graph();
        assert_eq!(g.chain_by_name("main"), Some(c));
        assert_eq!(g.chain_by_name("nope"), None);
        assert!(g.try_chain(ChainId(5)).is_err());
        assert!(g.try_node(NodeId(99)).is_err());
    }

    #[test]
    fn lookups_on_a_built_graph_report_core_errors() {
        use pt_core::CoreError;

        let (g, _) = line_graph();
        assert!(matches!(g.try_chain(ChainId(5)), Err(CoreError::ChainNotFound(ChainId(5)))));
        assert!(matches!(g.try_node(NodeId(99)), Err(CoreError::NodeNotFound(NodeId(99)))));
    }
}

#[cfg(test)]
mod geometry {
    use super::*;

    #[test]
    fn position_interpolates_within_segment() {
        let (g, c) = line_graph();
        assert_eq!(g.position_at(c, 0, 0.0), Vec3::ZERO);
        assert_eq!(g.position_at(c, 0, 0.5), Vec3::new(50.0, 0.0, 0.0));
        assert_eq!(g.position_at(c, 1, 0.25), Vec3::new(150.0, 0.0, 0.0));
    }

    #[test]
    fn terminal_node_position_ignores_fraction() {
        let (g, c) = line_graph();
        assert_eq!(g.position_at(c, 2, 0.0), Vec3::new(300.0, 0.0, 0.0));
        assert_eq!(g.position_at(c, 2, 0.7), Vec3::new(300.0, 0.0, 0.0));
    }

    #[test]
    fn segment_direction_is_unit() {
        let (g, c) = line_graph();
        assert_eq!(g.segment_direction(c, 0), Vec3::X);
        assert_eq!(g.segment_direction(c, 2), Vec3::ZERO);
    }

    #[test]
    fn nearest_node_snaps() {
        let (g, c) = line_graph();
        let near = g.nearest_node(Vec3::new(110.0, 5.0, 0.0)).unwrap();
        assert_eq!(near, g.chain(c).node_id(1));
        assert!(PathGraphBuilder::new().build().unwrap().nearest_node(Vec3::ZERO).is_none());
    }

    #[test]
    fn index_of_maps_node_back_into_its_chain() {
        let mut b = PathGraphBuilder::new();
        let a = b.add_chain("a", [Vec3::ZERO, Vec3::X]);
        let c = b.add_chain("b", [Vec3::Y, Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, 3.0, 0.0)]);
        let g = b.build().unwrap();
        let n = g.chain(c).node_id(2);
        assert_eq!(g.chain(c).index_of(n), Some(2));
        assert_eq!(g.chain(a).index_of(n), None);
        assert_eq!(g.chain(c).index_of(g.chain(a).node_id(1)), None);
    }
}

#[cfg(test)]
mod loader {
    use std::io::{Cursor, Write};

    use super::*;
    use crate::{load_graph_csv, load_graph_reader, PathError};

    const TWO_STAGES: &str = "\
chain,x,y,z,next_chain
stage_a,0,0,0,
stage_a,100,0,0,
stage_a,300,0,0,stage_b
stage_b,300,0,0,
stage_b,300,200,0,
";

    #[test]
    fn loads_chains_in_first_appearance_order() {
        let g = load_graph_reader(Cursor::new(TWO_STAGES)).unwrap();
        assert_eq!(g.chain_count(), 2);
        assert_eq!(g.node_count(), 5);

        let a = g.chain_by_name("stage_a").unwrap();
        let b = g.chain_by_name("stage_b").unwrap();
        assert_eq!(a, ChainId(0));
        assert_eq!(g.chain(a).successor, Some(b));
        assert_eq!(g.chain(b).successor, None);
        assert_eq!(g.chain(b).total_length(), 200.0);
    }

    #[test]
    fn unknown_successor_errors() {
        let csv = "chain,x,y,z,next_chain\na,0,0,0,ghost\n";
        let err = load_graph_reader(Cursor::new(csv)).map(|_| ()).unwrap_err();
        assert!(matches!(err, PathError::UnknownChain(name) if name == "ghost"));
    }

    #[test]
    fn conflicting_successors_error() {
        let csv = "chain,x,y,z,next_chain\na,0,0,0,b\na,1,0,0,c\nb,1,0,0,\nc,1,0,0,\n";
        assert!(matches!(load_graph_reader(Cursor::new(csv)), Err(PathError::Parse(_))));
    }

    #[test]
    fn malformed_number_is_csv_error() {
        let csv = "chain,x,y,z,next_chain\na,zero,0,0,\n";
        assert!(matches!(load_graph_reader(Cursor::new(csv)), Err(PathError::Csv(_))));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TWO_STAGES.as_bytes()).unwrap();
        let g = load_graph_csv(file.path()).unwrap();
        assert_eq!(g.chain_count(), 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_graph_csv(std::path::Path::new("/definitely/not/here.csv")).map(|_| ());
        assert!(matches!(err, Err(PathError::Io(_))));
    }
}
