use crate::{
    graph,
    solver,
};

/// Single pass greedy dominating set search.
///
/// Every round scores each uncovered town by the number of its uncovered
/// neighbours, places a station in the best one and covers it together with
/// its neighbourhood. Ties go to the lexicographically smallest id, which
/// makes the result reproducible across runs.
pub struct GreedySolver<'a> {
    towns: Vec<&'a graph::Town>,
    adjacency: Vec<Vec<usize>>,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Solution {
    pub stations: solver::Stations,
    pub rounds: usize,
}

impl<'a> GreedySolver<'a> {
    pub fn new(graph: &'a graph::Graph) -> GreedySolver<'a> {
        let mut towns: Vec<&graph::Town> = graph.vertices().collect();
        // index order doubles as the tie-break order
        towns.sort();

        let adjacency = towns
            .iter()
            .map(|town| {
                let mut indices: Vec<usize> = graph
                    .neighbours(town.id())
                    .map(|neighbours| {
                        neighbours
                            .iter()
                            .flat_map(|neighbour| towns.binary_search(&neighbour).ok())
                            .collect()
                    })
                    .unwrap_or_default();
                indices.sort_unstable();
                indices
            })
            .collect();

        GreedySolver {
            towns,
            adjacency,
        }
    }

    pub fn solve(&self) -> Solution {
        let mut uncovered = bit_vec::BitVec::from_elem(self.towns.len(), true);
        let mut uncovered_count = self.towns.len();
        let mut stations = solver::Stations::new();
        let mut rounds = 0;

        while uncovered_count > 0 {
            let (station_idx, score) = match self.best_candidate(&uncovered) {
                Some(candidate) =>
                    candidate,
                None =>
                    break,
            };
            rounds += 1;
            log::debug!(
                "round {}: station in {:?} with score {}, {} towns uncovered before",
                rounds,
                self.towns[station_idx].id(),
                score,
                uncovered_count,
            );

            for &idx in Some(&station_idx).into_iter().chain(self.adjacency[station_idx].iter()) {
                if uncovered[idx] {
                    uncovered.set(idx, false);
                    uncovered_count -= 1;
                }
            }
            stations.insert(self.towns[station_idx].clone());
        }

        Solution {
            stations,
            rounds,
        }
    }

    fn best_candidate(&self, uncovered: &bit_vec::BitVec) -> Option<(usize, usize)> {
        let mut best: Option<(usize, usize)> = None;
        for idx in 0 .. self.towns.len() {
            if !uncovered[idx] {
                continue;
            }
            let score = self.adjacency[idx]
                .iter()
                .filter(|&&neighbour_idx| uncovered[neighbour_idx])
                .count();
            // strict comparison keeps the earliest (smallest id) town on ties
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((idx, score));
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use rand::{
        SeedableRng,
        rngs::StdRng,
    };

    use super::*;

    use crate::{
        generator,
        graph::{
            Graph,
            Point,
            Town,
        },
    };

    fn town(id: &str) -> Town {
        Town::new(id, Point(0, 0))
    }

    fn ids(stations: &solver::Stations) -> Vec<&str> {
        stations.iter().map(Town::id).collect()
    }

    fn path(ids: &[&str]) -> Graph {
        let mut graph = Graph::new();
        for pair in ids.windows(2) {
            graph.connect(&town(pair[0]), &town(pair[1]));
        }
        graph
    }

    #[test]
    fn empty_graph() {
        let graph = Graph::new();
        let solution = GreedySolver::new(&graph).solve();
        assert!(solution.stations.is_empty());
        assert_eq!(solution.rounds, 0);
    }

    #[test]
    fn single_isolated_town() {
        let mut graph = Graph::new();
        graph.add_town(Town::new("Z", Point(3, 4)));
        assert_eq!(ids(&solver::solve(&graph)), vec!["Z"]);
    }

    #[test]
    fn star_graph() {
        let mut graph = Graph::new();
        for leaf in &["L1", "L2", "L3", "L4", "L5"] {
            graph.connect(&town("X"), &town(leaf));
        }
        let solution = GreedySolver::new(&graph).solve();
        assert_eq!(ids(&solution.stations), vec!["X"]);
        assert_eq!(solution.rounds, 1);
    }

    #[test]
    fn path_graph() {
        let graph = path(&["A", "B", "C", "D", "E"]);
        let stations = solver::solve(&graph);
        // B wins the first round over C and D by id, then D over E
        assert_eq!(ids(&stations), vec!["B", "D"]);
        assert!(solver::is_dominating(&graph, &stations));
    }

    #[test]
    fn tie_break_prefers_smallest_id() {
        let mut graph = Graph::new();
        graph.connect(&town("b"), &town("c"));
        graph.connect(&town("a"), &town("B"));
        // "B" < "a" < "b" < "c" in byte order
        assert_eq!(ids(&solver::solve(&graph)), vec!["B", "b"]);
    }

    #[test]
    fn isolated_towns_become_stations() {
        let mut graph = path(&["A", "B", "C"]);
        graph.add_town(town("I1"));
        graph.add_town(town("I2"));
        let stations = solver::solve(&graph);
        assert_eq!(ids(&stations), vec!["B", "I1", "I2"]);
    }

    #[test]
    fn zero_score_town_covers_itself() {
        // after C is picked, A and E are left with covered neighbours only
        let graph = path(&["A", "B", "C", "D", "E"]);
        let mut graph_with_hub = graph.clone();
        graph_with_hub.connect(&town("C"), &town("A2"));
        graph_with_hub.connect(&town("C"), &town("A3"));
        let stations = solver::solve(&graph_with_hub);
        assert_eq!(ids(&stations), vec!["A", "C", "E"]);
        assert!(solver::is_dominating(&graph_with_hub, &stations));
    }

    #[test]
    fn random_graphs_are_dominated() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for round in 0 .. 64 {
            let params = generator::Params {
                towns_count: round % 24,
                edge_probability: (round % 8) as f64 / 10.0,
                width: 640,
                height: 320,
            };
            let graph = generator::generate(&mut rng, &params);
            let solution = GreedySolver::new(&graph).solve();

            assert!(solver::undominated(&graph, &solution.stations).is_empty());
            assert_eq!(solution.stations.is_empty(), graph.is_empty());
            assert!(solution.rounds <= graph.len());
            assert_eq!(solution.rounds, solution.stations.len());
            for town in graph.vertices() {
                if graph.neighbours(town.id()).unwrap().is_empty() {
                    assert!(solution.stations.contains(town));
                }
            }
        }
    }

    #[test]
    fn solve_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(42);
        let graph = generator::generate(&mut rng, &generator::Params {
            towns_count: 40,
            edge_probability: 0.1,
            width: 100,
            height: 100,
        });
        let first = solver::solve(&graph);
        let second = solver::solve(&graph.clone());
        assert_eq!(first, second);
    }
}
