use std::{
    collections::BTreeSet,
};

use crate::{
    graph,
};

pub mod greedy;

/// Towns picked to host a fire station, ordered by id.
pub type Stations = BTreeSet<graph::Town>;

/// Greedy approximation of a minimum dominating set, see `greedy::GreedySolver`.
pub fn solve(graph: &graph::Graph) -> Stations {
    greedy::GreedySolver::new(graph)
        .solve()
        .stations
}

/// Vertices that neither host a station nor neighbour one.
pub fn undominated<'a>(graph: &'a graph::Graph, stations: &Stations) -> Vec<&'a graph::Town> {
    let mut towns: Vec<_> = graph
        .vertices()
        .filter(|town| !is_covered(graph, town, stations))
        .collect();
    towns.sort();
    towns
}

pub fn is_dominating(graph: &graph::Graph, stations: &Stations) -> bool {
    graph.vertices().all(|town| is_covered(graph, town, stations))
}

fn is_covered(graph: &graph::Graph, town: &graph::Town, stations: &Stations) -> bool {
    if stations.contains(town) {
        return true;
    }
    match graph.neighbours(town.id()) {
        Ok(neighbours) =>
            neighbours.iter().any(|neighbour| stations.contains(neighbour)),
        Err(graph::UnknownVertex { .. }) =>
            false,
    }
}
