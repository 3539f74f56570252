#![allow(dead_code)]

use osm_paths::{
    graphs::{
        coordinate::Coordinate,
        edge::{DirectedWeightedEdge, Edge},
        Graph, Vertex,
    },
    Algorithm,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

pub const ALGORITHMS: [Algorithm; 5] = [
    Algorithm::Dijkstra,
    Algorithm::Astar,
    Algorithm::Bidijkstra,
    Algorithm::Biastar,
    Algorithm::Alt,
];

/// Random sparse graph around Copenhagen. Every edge costs at least its
/// crow-flies length in meters, so the haversine heuristic is admissible.
pub fn random_graph(number_of_vertices: u32, out_degree: u32, seed: u64) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let coordinates: Vec<Coordinate> = (0..number_of_vertices)
        .map(|_| {
            Coordinate::from_lat_lon(
                55.6 + rng.gen_range(0.0..0.05),
                12.5 + rng.gen_range(0.0..0.05),
            )
        })
        .collect();

    let mut edges = Vec::new();
    for tail in 0..number_of_vertices {
        for _ in 0..out_degree {
            let head = rng.gen_range(0..number_of_vertices);
            let crow_flies = coordinates[tail as usize]
                .haversine_distance(&coordinates[head as usize])
                .ceil() as u32;
            edges.push(DirectedWeightedEdge::new(
                tail,
                head,
                crow_flies + rng.gen_range(0..500),
            ));
        }
    }

    Graph::from_edges(number_of_vertices, &edges, coordinates).unwrap()
}

/// `width` x `width` grid with vertices about 1 km apart. Costs vary between
/// 1100 and 1500 and differ per direction.
pub fn grid_graph(width: u32) -> Graph {
    let vertex = |x: u32, y: u32| y * width + x;
    let coordinates = (0..width * width)
        .map(|v| Coordinate::from_lat_lon(55.0 + (v / width) as f64 * 0.009, 12.0 + (v % width) as f64 * 0.0157))
        .collect();

    let mut edges = Vec::new();
    for y in 0..width {
        for x in 0..width {
            let weight = 1_100 + (x * 31 + y * 17) % 400;
            if x + 1 < width {
                edges.push(DirectedWeightedEdge::new(vertex(x, y), vertex(x + 1, y), weight));
                edges.push(DirectedWeightedEdge::new(vertex(x + 1, y), vertex(x, y), weight + 7));
            }
            if y + 1 < width {
                edges.push(DirectedWeightedEdge::new(vertex(x, y), vertex(x, y + 1), weight + 3));
                edges.push(DirectedWeightedEdge::new(vertex(x, y + 1), vertex(x, y), weight));
            }
        }
    }

    Graph::from_edges(width * width, &edges, coordinates).unwrap()
}

/// Hand-built graph of eight vertices (ids 1 to 8, 0 is unused) given as
/// forward and backward adjacency lists.
pub fn isolated_graph() -> Graph {
    let forward = vec![
        vec![],
        vec![Edge::new(2, 613), Edge::new(8, 2524)],
        vec![Edge::new(1, 613), Edge::new(3, 3501)],
        vec![Edge::new(2, 3501), Edge::new(5, 45)],
        vec![Edge::new(3, 75), Edge::new(5, 53)],
        vec![Edge::new(3, 45), Edge::new(4, 53), Edge::new(6, 820)],
        vec![Edge::new(5, 820), Edge::new(7, 60)],
        vec![Edge::new(6, 60), Edge::new(8, 874)],
        vec![Edge::new(1, 2524), Edge::new(7, 874)],
    ];
    let backward = vec![
        vec![],
        vec![Edge::new(2, 613), Edge::new(8, 2524)],
        vec![Edge::new(1, 613), Edge::new(3, 3501)],
        vec![Edge::new(2, 3501), Edge::new(4, 75), Edge::new(5, 45)],
        vec![Edge::new(5, 53)],
        vec![Edge::new(3, 45), Edge::new(4, 53), Edge::new(6, 820)],
        vec![Edge::new(5, 820), Edge::new(7, 60)],
        vec![Edge::new(6, 60), Edge::new(8, 874)],
        vec![Edge::new(1, 2524), Edge::new(7, 874)],
    ];

    Graph::from_adjacency(forward, backward, vec![Coordinate::default(); 9]).unwrap()
}

/// 0 -> 1 -> 4 costs 10, the detour 0 -> 2 -> 3 -> 4 costs 9.
pub fn detour_graph() -> Graph {
    let edges = [
        DirectedWeightedEdge::new(0, 1, 5),
        DirectedWeightedEdge::new(1, 4, 5),
        DirectedWeightedEdge::new(0, 2, 3),
        DirectedWeightedEdge::new(2, 3, 3),
        DirectedWeightedEdge::new(3, 4, 3),
    ];
    Graph::from_edges(5, &edges, vec![Coordinate::default(); 5]).unwrap()
}

pub fn all_pairs(graph: &Graph) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
    (0..graph.number_of_vertices())
        .flat_map(move |source| (0..graph.number_of_vertices()).map(move |target| (source, target)))
}
