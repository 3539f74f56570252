use osm_paths::{
    graphs::{Direction, Distance},
    search::{
        alt::landmark::Landmarks,
        astar::AStar,
        dijkstra::{one_to_all, Dijkstra},
        heuristics::{DistanceHeuristic, HaversineHeuristic, Heuristic},
        PathFinding,
    },
};

mod common;

#[test]
fn landmark_bounds_are_admissible() {
    let graph = common::random_graph(70, 2, 11);
    let landmarks = Landmarks::random(&graph, 5, 11);

    for target in 0..graph.number_of_vertices() {
        let distances_to_target = one_to_all(&graph, target, Direction::Backward);
        for (vertex, &distance) in distances_to_target.iter().enumerate() {
            if distance == Distance::MAX {
                continue;
            }
            for landmark in &landmarks.landmarks {
                assert!(
                    landmark.lower_bound(vertex as u32, target) <= distance,
                    "landmark {} overestimates {} -> {}",
                    landmark.vertex,
                    vertex,
                    target
                );
            }
            assert!(landmarks.lower_bound(vertex as u32, target) <= distance);
        }
    }
}

#[test]
fn best_landmarks_bound_at_least_as_tight_as_any_single_one() {
    let graph = common::grid_graph(6);
    let landmarks = Landmarks::farthest(&graph, 6, 0);

    for (source, target) in common::all_pairs(&graph) {
        let best = landmarks.find_best_landmarks(source, target, 1);
        let bound = best[0].lower_bound(source, target);
        assert!(landmarks
            .landmarks
            .iter()
            .all(|landmark| landmark.lower_bound(source, target) <= bound));
        assert_eq!(Heuristic::Landmarks(best).lower_bound(source, target), bound);
    }
}

#[test]
fn haversine_is_admissible_on_roads_longer_than_crow_flies() {
    let graph = common::random_graph(50, 3, 5);
    assert_eq!(graph.count_edges_shorter_than_crow_flies(1.0), 0);
    let heuristic = HaversineHeuristic::new(&graph);

    for target in 0..graph.number_of_vertices() {
        let distances_to_target = one_to_all(&graph, target, Direction::Backward);
        for (vertex, &distance) in distances_to_target.iter().enumerate() {
            if distance != Distance::MAX {
                assert!(heuristic.lower_bound(vertex as u32, target) <= distance);
            }
        }
    }
}

#[test]
fn astar_never_visits_more_than_dijkstra() {
    let graph = common::grid_graph(12);
    let mut dijkstra = Dijkstra::new(&graph);
    let mut astar = AStar::with_haversine(&graph);

    let mut fewer = 0;
    for (source, target) in common::all_pairs(&graph).step_by(7) {
        let expected = dijkstra.find_path(source, target).unwrap();
        let result = astar.find_path(source, target).unwrap();

        assert_eq!(result.distance, expected.distance);
        assert!(
            result.nodes_visited <= expected.nodes_visited,
            "{} -> {}: a* visited {} but dijkstra {}",
            source,
            target,
            result.nodes_visited,
            expected.nodes_visited
        );
        if result.nodes_visited < expected.nodes_visited {
            fewer += 1;
        }
    }
    assert!(fewer > 0);
}
