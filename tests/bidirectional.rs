use osm_paths::search::{
    bidirectional::{
        bidirectional_astar::BidirectionalAStar,
        bidirectional_dijkstra::{BidirectionalDijkstra, StoppingRule},
    },
    dijkstra::Dijkstra,
    PathFinding,
};

mod common;

#[test]
fn stopping_at_first_meeting_can_be_suboptimal() {
    let graph = common::detour_graph();

    let optimal = Dijkstra::new(&graph).find_path(0, 4).unwrap();
    assert_eq!(optimal.distance, 9);

    let early = BidirectionalDijkstra::with_stopping_rule(&graph, StoppingRule::FirstMeeting)
        .find_path(0, 4)
        .unwrap();
    assert_eq!(early.distance, 10);
    assert!(early.distance > optimal.distance);

    let exact = BidirectionalDijkstra::new(&graph).find_path(0, 4).unwrap();
    assert_eq!(exact.distance, optimal.distance);
    assert_eq!(exact.path, optimal.path);

    let exact = BidirectionalAStar::with_haversine(&graph)
        .find_path(0, 4)
        .unwrap();
    assert_eq!(exact.distance, optimal.distance);
}

#[test]
fn frontier_sum_rule_is_exact_where_first_meeting_is_not() {
    let mut suboptimal = 0;
    for seed in 0..5 {
        let graph = common::random_graph(60, 3, 100 + seed);
        let mut dijkstra = Dijkstra::new(&graph);
        let mut exact = BidirectionalDijkstra::new(&graph);
        let mut early = BidirectionalDijkstra::with_stopping_rule(&graph, StoppingRule::FirstMeeting);

        for (source, target) in common::all_pairs(&graph) {
            let Ok(expected) = dijkstra.find_path(source, target) else {
                continue;
            };
            assert_eq!(
                exact.find_path(source, target).unwrap().distance,
                expected.distance
            );
            let early = early.find_path(source, target).unwrap();
            assert!(early.distance >= expected.distance);
            assert_eq!(graph.get_path_distance(&early.path), Some(early.distance));
            if early.distance > expected.distance {
                suboptimal += 1;
            }
        }
    }
    assert!(suboptimal > 0);
}

#[test]
fn bidirectional_counts_both_sides() {
    let graph = common::grid_graph(8);
    let result = BidirectionalDijkstra::new(&graph).find_path(0, 63).unwrap();
    let dijkstra = Dijkstra::new(&graph).find_path(0, 63).unwrap();

    assert_eq!(result.distance, dijkstra.distance);
    assert!(result.nodes_visited > 0);
    assert!(result.nodes_visited < dijkstra.nodes_visited);
}
