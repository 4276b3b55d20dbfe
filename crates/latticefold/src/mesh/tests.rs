use std::collections::HashSet;

use proptest::prelude::*;

use super::*;

fn p(x: i32, y: i32) -> LatticePoint {
    LatticePoint::new(x, y)
}

#[test]
fn eight_by_eight_partition_counts() {
    let mesh = GridMesh::square(8);
    assert_eq!(mesh.edges().len(), 4 * 8 * 8 + 2 * 8);
    let count = |k: EdgeKind| mesh.edges().iter().filter(|e| e.kind() == k).count();
    assert_eq!(count(EdgeKind::Boundary), 32);
    assert_eq!(count(EdgeKind::Clickable), 84);
    assert_eq!(count(EdgeKind::Interior), 156);
    assert_eq!(mesh.use_counts(), (84, 32, 156));
}

#[test]
fn classification_examples() {
    let c = EdgeClassifier::new(8, 8);
    // outline segment
    assert!(c.is_boundary_edge(p(3, 0), p(4, 0)));
    // diagonal between two outline points is never boundary
    assert!(!c.is_boundary_edge(p(1, 0), p(0, 1)));
    assert!(c.is_clickable(p(1, 0), p(0, 1)));
    // spoke from the outline inward
    assert!(c.is_clickable(p(0, 4), p(1, 4)));
    assert!(c.is_clickable(p(0, 0), p(1, 1)));
    // both ends strictly inside
    assert_eq!(c.classify(p(3, 3), p(4, 4)), EdgeKind::Interior);
    assert_eq!(c.classify(p(8, 2), p(8, 3)), EdgeKind::Boundary);
}

#[test]
fn lookup_accepts_either_endpoint_order() {
    let mesh = GridMesh::square(4);
    let fwd = mesh.edge(p(2, 1), p(1, 2)).expect("down-left diagonal exists");
    let rev = mesh.edge(p(1, 2), p(2, 1)).expect("same edge reversed");
    assert_eq!(fwd, rev);
    assert!(mesh.edge(p(0, 0), p(2, 2)).is_none());
    assert!(mesh.edge(p(4, 4), p(5, 5)).is_none());
}

#[test]
fn set_edge_use_errors() {
    let mut mesh = GridMesh::square(4);
    assert_eq!(
        mesh.set_edge_use(p(0, 0), p(2, 0), EdgeUse::Used),
        Err(CpError::EdgeNotFound {
            a: p(0, 0),
            b: p(2, 0)
        })
    );
    assert_eq!(
        mesh.set_edge_use(p(1, 0), p(0, 0), EdgeUse::NotUsed),
        Err(CpError::BoundaryEdgeLocked {
            edge: EdgeKey::new(p(0, 0), p(1, 0))
        })
    );
    assert_eq!(mesh.edge(p(0, 0), p(1, 0)).unwrap().usage(), EdgeUse::Used);

    let prev = mesh.set_edge_use(p(2, 2), p(1, 1), EdgeUse::Used).unwrap();
    assert_eq!(prev, EdgeUse::Unknown);
    assert_eq!(mesh.edge(p(1, 1), p(2, 2)).unwrap().usage(), EdgeUse::Used);
}

#[test]
fn toggle_only_flips_clickable_edges_and_reset_restores_defaults() {
    let mut mesh = GridMesh::square(8);
    assert_eq!(mesh.toggle_edge(p(0, 3), p(1, 3)), Ok(EdgeUse::Used));
    assert_eq!(mesh.toggle_edge(p(1, 3), p(0, 3)), Ok(EdgeUse::NotUsed));
    assert_eq!(mesh.toggle_edge(p(0, 3), p(1, 3)), Ok(EdgeUse::Used));
    // boundary and interior clicks are ignored
    assert_eq!(mesh.toggle_edge(p(0, 3), p(0, 4)), Ok(EdgeUse::Used));
    assert_eq!(mesh.toggle_edge(p(3, 3), p(4, 3)), Ok(EdgeUse::Unknown));
    assert!(mesh.toggle_edge(p(3, 3), p(5, 3)).is_err());

    mesh.set_edge_use(p(3, 3), p(4, 3), EdgeUse::NotUsed).unwrap();
    mesh.reset();
    let fresh = GridMesh::square(8);
    assert_eq!(mesh.to_flat_list(), fresh.to_flat_list());
}

#[test]
fn copy_is_independent() {
    let base = GridMesh::square(5);
    let mut copy = base.clone();
    copy.set_edge_use(p(0, 1), p(1, 1), EdgeUse::Used).unwrap();
    assert_eq!(base.edge(p(0, 1), p(1, 1)).unwrap().usage(), EdgeUse::NotUsed);
    assert_eq!(copy.edge(p(0, 1), p(1, 1)).unwrap().usage(), EdgeUse::Used);
    let kinds = |m: &GridMesh| m.edges().iter().map(|e| e.kind()).collect::<Vec<_>>();
    assert_eq!(kinds(&base), kinds(&copy));
}

#[test]
fn corner_edges_are_the_corner_diagonals() {
    let mesh = GridMesh::square(8);
    let found: HashSet<EdgeKey> = mesh.corner_edges().iter().map(|e| e.key()).collect();
    let expected: HashSet<EdgeKey> = mesh.corner_diagonals().into_iter().collect();
    assert_eq!(found, expected);
    for key in mesh.corner_diagonals() {
        assert!(mesh.edge_by_key(key).unwrap().is_clickable());
    }
}

#[test]
fn interior_index_round_trip() {
    let mesh = GridMesh::square(8);
    assert_eq!(mesh.interior_index(p(1, 1)), Some(0));
    assert_eq!(mesh.interior_index(p(7, 1)), Some(6));
    assert_eq!(mesh.interior_index(p(1, 2)), Some(7));
    assert_eq!(mesh.interior_index(p(7, 7)), Some(48));
    assert_eq!(mesh.interior_index(p(0, 3)), None);
    assert_eq!(mesh.interior_index(p(3, 8)), None);
    for i in 0..mesh.interior_count() {
        let q = mesh.interior_point(i).unwrap();
        assert_eq!(mesh.interior_index(q), Some(i));
    }
    assert_eq!(mesh.interior_point(49), None);
}

#[test]
fn flat_list_layout() {
    let mesh = GridMesh::square(1);
    let flat = mesh.to_flat_list();
    assert_eq!(&flat[..2], &[1, 1]);
    assert_eq!(flat.len(), 2 + 5 * mesh.edges().len());
    // first generated edge: (0,0) down to (0,1), a boundary edge
    assert_eq!(&flat[2..7], &[0, 0, 0, 1, 1]);
}

#[test]
fn flat_list_writes_undecided_edges_as_minus_one() {
    let mesh = GridMesh::square(3);
    let flat = mesh.to_flat_list();
    let records: Vec<&[i32]> = flat[2..].chunks(5).collect();
    assert_eq!(records.len(), mesh.edges().len());
    let undecided: Vec<&[i32]> = records.iter().copied().filter(|r| r[4] == -1).collect();
    assert_eq!(undecided.len(), 6);
    for r in &undecided {
        assert!((1..=2).contains(&r[0]) && (1..=2).contains(&r[1]), "{r:?}");
        assert!((1..=2).contains(&r[2]) && (1..=2).contains(&r[3]), "{r:?}");
    }
    assert!(records.iter().all(|r| (-1..=1).contains(&r[4])));
}

#[test]
#[should_panic(expected = "must be square")]
fn rectangular_mesh_is_rejected() {
    let _ = GridMesh::new(3, 4);
}

proptest! {
    #[test]
    fn one_edge_per_unordered_pair(n in 1usize..=12) {
        let mesh = GridMesh::square(n);
        let keys: HashSet<EdgeKey> = mesh.edges().iter().map(|e| e.key()).collect();
        prop_assert_eq!(keys.len(), mesh.edges().len());
        prop_assert_eq!(mesh.edges().len(), 4 * n * n + 2 * n);
    }

    #[test]
    fn partition_matches_predicates(n in 1usize..=12) {
        let mesh = GridMesh::square(n);
        let c = mesh.classifier();
        for e in mesh.edges() {
            let boundary = c.is_boundary_edge(e.a(), e.b());
            let clickable = c.is_clickable(e.a(), e.b());
            prop_assert!(!(boundary && clickable));
            prop_assert_eq!(e.is_boundary(), boundary);
            prop_assert_eq!(e.is_clickable(), clickable);
            if e.is_boundary() {
                prop_assert_eq!(e.usage(), EdgeUse::Used);
            }
            if !boundary && !clickable {
                prop_assert!(c.is_interior_point(e.a()) && c.is_interior_point(e.b()));
                prop_assert_eq!(e.usage(), EdgeUse::Unknown);
            }
        }
        prop_assert_eq!(
            mesh.edges().iter().filter(|e| e.is_boundary()).count(),
            4 * n
        );
    }
}
