use std::{
    collections::HashMap,
};

use crate::{
    graph,
    solver,
};

/// Per town `hasStation` flag as shown by the editor.
///
/// The flag is derived from the last solver run and lives outside of the
/// graph: the solver never reads it.
#[derive(Clone, Default, Debug)]
pub struct StationFlags {
    flags: HashMap<String, bool, graph::TownsHasher>,
}

impl StationFlags {
    pub fn new() -> StationFlags {
        StationFlags::default()
    }

    /// Recomputes the flag of every vertex of `graph`: set iff the town is a
    /// member of `stations`. Flags of towns no longer in the graph are dropped.
    pub fn refresh(&mut self, graph: &graph::Graph, stations: &solver::Stations) {
        self.flags.clear();
        for town in graph.vertices() {
            self.flags.insert(town.id().to_string(), stations.contains(town));
        }
        log::debug!("station flags refreshed: {} of {} towns have a station", stations.len(), self.flags.len());
    }

    pub fn reset(&mut self) {
        self.flags.clear();
    }

    pub fn has_station(&self, id: &str) -> bool {
        self.flags.get(id).copied().unwrap_or(false)
    }

    pub fn iter<'a>(&'a self, graph: &'a graph::Graph) -> impl Iterator<Item = (&'a graph::Town, bool)> + 'a {
        graph.vertices().map(move |town| (town, self.has_station(town.id())))
    }

    pub fn label(&self, town: &graph::Town) -> String {
        if self.has_station(town.id()) {
            format!("FS:{}", town.id())
        } else {
            format!("T:{}", town.id())
        }
    }
}
