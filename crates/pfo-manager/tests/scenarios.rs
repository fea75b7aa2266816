//! End-to-end scenarios through the trusted surfaces.

use pfo_core::{ClusterId, PfoMetadata, PfoParameters, StatusCode, TrackId};
use pfo_test_utils::{check_graph_invariants, graph_snapshot, seeded_pipeline, single_cluster};

#[test]
fn last_constituent_cannot_be_removed() {
    let mut pipeline = seeded_pipeline(4, 4);
    pipeline
        .run_algorithm("Trim", |api| {
            let p = api.create_pfo(&single_cluster(1)).unwrap();
            api.add_track_to_pfo(p, TrackId(1)).unwrap();
            assert_eq!(
                StatusCode::of(&api.remove_cluster_from_pfo(p, ClusterId(1))),
                StatusCode::Success
            );

            let before = graph_snapshot(api.pfos());
            assert_eq!(
                StatusCode::of(&api.remove_track_from_pfo(p, TrackId(1))),
                StatusCode::NotAllowed
            );
            assert_eq!(graph_snapshot(api.pfos()), before);

            let pfo = api.pfo(p).unwrap();
            assert!(pfo.clusters().is_empty());
            assert_eq!(pfo.tracks().len(), 1);
            assert!(pfo.tracks().contains(&TrackId(1)));

            // The prescribed follow-up: delete the whole PFO.
            api.delete_pfo(p).unwrap();
            assert!(api.pfo(p).is_none());
        })
        .unwrap();
}

#[test]
fn duplicate_and_missing_hierarchy_edges() {
    let mut pipeline = seeded_pipeline(4, 0);
    pipeline
        .run_algorithm("Hierarchy", |api| {
            let a = api.create_pfo(&single_cluster(0)).unwrap();
            let b = api.create_pfo(&single_cluster(1)).unwrap();

            assert_eq!(
                StatusCode::of(&api.set_parent_daughter_association(a, b)),
                StatusCode::Success
            );
            assert_eq!(
                StatusCode::of(&api.set_parent_daughter_association(a, b)),
                StatusCode::AlreadyAssociated
            );
            assert_eq!(
                StatusCode::of(&api.remove_parent_daughter_association(a, b)),
                StatusCode::Success
            );
            assert_eq!(
                StatusCode::of(&api.remove_parent_daughter_association(a, b)),
                StatusCode::NotFound
            );
            check_graph_invariants(api.pfos()).unwrap();
        })
        .unwrap();
}

#[test]
fn empty_creation_then_fill() {
    let mut pipeline = seeded_pipeline(2, 2);
    pipeline
        .run_algorithm("Fill", |api| {
            let p = api.create_pfo(&PfoParameters::new(22, 0)).unwrap();
            assert!(api.pfo(p).unwrap().is_empty());

            // Nothing to remove yet: absence is reported before the guard.
            assert_eq!(
                StatusCode::of(&api.remove_cluster_from_pfo(p, ClusterId(0))),
                StatusCode::NotFound
            );

            api.add_cluster_to_pfo(p, ClusterId(0)).unwrap();
            assert_eq!(
                StatusCode::of(&api.remove_cluster_from_pfo(p, ClusterId(0))),
                StatusCode::NotAllowed
            );
            assert_eq!(api.pfo(p).unwrap().constituent_count(), 1);
        })
        .unwrap();
}

#[test]
fn readding_constituent_is_already_associated() {
    let mut pipeline = seeded_pipeline(2, 2);
    pipeline
        .run_algorithm("Readd", |api| {
            let p = api.create_pfo(&single_cluster(0)).unwrap();
            let before = graph_snapshot(api.pfos());
            assert_eq!(
                StatusCode::of(&api.add_cluster_to_pfo(p, ClusterId(0))),
                StatusCode::AlreadyAssociated
            );
            assert_eq!(graph_snapshot(api.pfos()), before);
        })
        .unwrap();
}

#[test]
fn malformed_creation_is_invalid_parameter() {
    let mut pipeline = seeded_pipeline(2, 2);
    pipeline
        .run_algorithm("Create", |api| {
            let dup = PfoParameters::new(22, 0)
                .with_cluster(ClusterId(0))
                .with_cluster(ClusterId(0));
            let unknown = PfoParameters::new(22, 0).with_track(TrackId(77));
            let nan = single_cluster(1).with_energy(f32::NAN);
            for params in [dup, unknown, nan] {
                assert_eq!(
                    StatusCode::of(&api.create_pfo(&params)),
                    StatusCode::InvalidParameter
                );
            }
            assert!(api.created_pfos().is_empty());
        })
        .unwrap();
    assert!(pipeline.pfos().is_empty());
}

#[test]
fn deleting_a_node_in_a_chain_leaves_no_dangling_edges() {
    let mut pipeline = seeded_pipeline(6, 0);
    let survivors = pipeline
        .run_algorithm("Decay", |api| {
            let ids: Vec<_> = (0..4)
                .map(|c| api.create_pfo(&single_cluster(c)).unwrap())
                .collect();
            // 0 -> 1 -> 2, 0 -> 2, 3 -> 1
            api.set_parent_daughter_association(ids[0], ids[1]).unwrap();
            api.set_parent_daughter_association(ids[1], ids[2]).unwrap();
            api.set_parent_daughter_association(ids[0], ids[2]).unwrap();
            api.set_parent_daughter_association(ids[3], ids[1]).unwrap();

            api.delete_pfo(ids[1]).unwrap();
            check_graph_invariants(api.pfos()).unwrap();
            ids
        })
        .unwrap();

    let pfos = pipeline.pfos();
    assert_eq!(pfos.len(), 3);
    let root = pfos.get(survivors[0]).unwrap();
    assert_eq!(root.daughters().iter().copied().collect::<Vec<_>>(), vec![survivors[2]]);
    assert!(pfos.get(survivors[3]).unwrap().daughters().is_empty());
    assert_eq!(
        pfos.get(survivors[2]).unwrap().parents().iter().copied().collect::<Vec<_>>(),
        vec![survivors[0]]
    );
}

#[test]
fn pfos_persist_across_algorithms_until_pass_reset() {
    let mut pipeline = seeded_pipeline(2, 2);
    let first = pipeline
        .run_algorithm("First", |api| api.create_pfo(&single_cluster(0)).unwrap())
        .unwrap();
    pipeline
        .run_algorithm("Second", |api| {
            api.add_track_to_pfo(first, TrackId(0)).unwrap();
            api.alter_metadata(
                first,
                &PfoMetadata {
                    particle_id: Some(11),
                    charge: Some(-1),
                    ..PfoMetadata::default()
                },
            )
            .unwrap();
            assert!(api.created_pfos().is_empty());
        })
        .unwrap();

    let pfo = pipeline.pfos().get(first).unwrap();
    assert_eq!(pfo.particle_id(), 11);
    assert_eq!(pfo.constituent_count(), 2);

    pipeline.reset_pass();
    assert!(pipeline.pfos().get(first).is_none());
    pipeline
        .run_algorithm("NextPass", |api| {
            assert_eq!(
                StatusCode::of(&api.add_cluster_to_pfo(first, ClusterId(0))),
                StatusCode::InvalidParameter
            );
        })
        .unwrap();
}

#[test]
fn stale_handle_never_aliases_a_new_pfo() {
    let mut pipeline = seeded_pipeline(2, 0);
    pipeline
        .run_algorithm("Reuse", |api| {
            let old = api.create_pfo(&single_cluster(0)).unwrap();
            api.delete_pfo(old).unwrap();
            let new = api.create_pfo(&single_cluster(1)).unwrap();
            assert_ne!(old, new);
            assert_eq!(
                StatusCode::of(&api.add_cluster_to_pfo(old, ClusterId(0))),
                StatusCode::InvalidParameter
            );
            assert!(!api.pfo(new).unwrap().clusters().contains(&ClusterId(0)));
        })
        .unwrap();
}
