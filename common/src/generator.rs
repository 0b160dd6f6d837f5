use rand::Rng;

use crate::{
    graph,
};

#[derive(Clone, Debug)]
pub struct Params {
    pub towns_count: usize,
    /// chance for each unordered pair of towns to get a road [0.0 - 1.0]
    pub edge_probability: f64,
    pub width: i64,
    pub height: i64,
}

/// Builds a random map with towns named `1..=towns_count`, placed uniformly
/// inside `[0, width] x [0, height]`.
pub fn generate<R>(rng: &mut R, params: &Params) -> graph::Graph where R: Rng + ?Sized {
    let edge_probability = params.edge_probability.max(0.0).min(1.0);
    let mut map = graph::Graph::new();
    let mut towns = Vec::with_capacity(params.towns_count);
    for _ in 0 .. params.towns_count {
        let origin = graph::Point(
            rng.gen_range(0 ..= params.width.max(0)),
            rng.gen_range(0 ..= params.height.max(0)),
        );
        let town = graph::Town::new(map.next_town_id(), origin);
        map.add_town(town.clone());
        towns.push(town);
    }

    for (idx, town) in towns.iter().enumerate() {
        for other in &towns[idx + 1 ..] {
            if rng.gen_bool(edge_probability) {
                map.connect(town, other);
            }
        }
    }

    log::debug!("generated map with {} towns and {} roads", map.len(), map.edges_count());
    map
}
