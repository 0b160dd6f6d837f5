use std::{
    cmp,
    fmt,
    hash::{
        Hash,
        Hasher,
        BuildHasherDefault,
    },
    borrow::Borrow,
    collections::{
        HashMap,
        HashSet,
    },
};

use serde_derive::{
    Serialize,
    Deserialize,
};

pub type TownsHasher = BuildHasherDefault<seahash::SeaHasher>;

pub type Neighbours = HashSet<Town, TownsHasher>;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default, Debug)]
pub struct Point(pub i64, pub i64);

/// A vertex of the map. Identity is the `id` only: `origin` is carried along
/// for presentation and never takes part in equality, ordering or hashing.
#[derive(Clone, Debug)]
pub struct Town {
    id: String,
    origin: Point,
}

impl Town {
    pub fn new<S>(id: S, origin: Point) -> Town where S: Into<String> {
        Town { id: id.into(), origin, }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn origin(&self) -> Point {
        self.origin
    }
}

impl PartialEq for Town {
    fn eq(&self, other: &Town) -> bool {
        self.id == other.id
    }
}

impl Eq for Town { }

impl Hash for Town {
    fn hash<H>(&self, state: &mut H) where H: Hasher {
        // must stay identical to `str` hashing for `Borrow<str>` lookups
        self.id.hash(state)
    }
}

impl PartialOrd for Town {
    fn partial_cmp(&self, other: &Town) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Town {
    fn cmp(&self, other: &Town) -> cmp::Ordering {
        self.id.cmp(&other.id)
    }
}

impl Borrow<str> for Town {
    fn borrow(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Town {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct UnknownVertex {
    pub id: String,
}

/// Undirected town map stored as a symmetric adjacency list.
///
/// Mutation goes through `&mut Graph`, so an editing session is the single
/// writer while the solver and the serializer only ever borrow it shared.
/// Nothing inside synchronizes access: callers that share one graph across
/// threads must wrap it themselves.
#[derive(Clone, Default, Debug)]
pub struct Graph {
    towns: HashMap<Town, Neighbours, TownsHasher>,
}

impl Graph {
    pub fn new() -> Graph {
        Graph::default()
    }

    /// Inserts `town` with no neighbours. Returns `false` (and keeps the
    /// existing vertex with its origin) if a town with the same id is there.
    pub fn add_town(&mut self, town: Town) -> bool {
        if self.towns.contains_key(town.id()) {
            return false;
        }
        self.towns.insert(town, Neighbours::default());
        true
    }

    pub fn connect(&mut self, a: &Town, b: &Town) {
        if a == b {
            return;
        }
        self.add_town(a.clone());
        self.add_town(b.clone());
        self.link(a.id(), b.id());
    }

    /// Same as `connect` but both ends must already be vertices.
    pub fn connect_ids(&mut self, a: &str, b: &str) -> Result<(), UnknownVertex> {
        for id in [a, b].iter() {
            if !self.contains(id) {
                return Err(UnknownVertex { id: id.to_string(), });
            }
        }
        if a != b {
            self.link(a, b);
        }
        Ok(())
    }

    fn link(&mut self, a: &str, b: &str) {
        // stored keys are canonical: neighbour sets hold their clones
        let town_a = self.town_key(a);
        let town_b = self.town_key(b);
        if let (Some(town_a), Some(town_b)) = (town_a, town_b) {
            if let Some(neighbours) = self.towns.get_mut(a) {
                neighbours.insert(town_b);
            }
            if let Some(neighbours) = self.towns.get_mut(b) {
                neighbours.insert(town_a);
            }
        }
    }

    fn town_key(&self, id: &str) -> Option<Town> {
        self.towns.get_key_value(id).map(|(town, _)| town.clone())
    }

    pub fn neighbours(&self, id: &str) -> Result<&Neighbours, UnknownVertex> {
        self.towns.get(id)
            .ok_or_else(|| UnknownVertex { id: id.to_string(), })
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Town> {
        self.towns.keys()
    }

    /// Every directed adjacency pair: an undirected edge shows up twice.
    pub fn adjacency(&self) -> impl Iterator<Item = (&Town, &Town)> {
        self.towns
            .iter()
            .flat_map(|(town, neighbours)| neighbours.iter().map(move |neighbour| (town, neighbour)))
    }

    pub fn town(&self, id: &str) -> Option<&Town> {
        self.towns.get_key_value(id).map(|(town, _)| town)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.towns.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.towns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.towns.is_empty()
    }

    pub fn edges_count(&self) -> usize {
        self.towns.values().map(|neighbours| neighbours.len()).sum::<usize>() / 2
    }

    /// Id the editor gives to a freshly placed town.
    pub fn next_town_id(&self) -> String {
        (self.towns.len() + 1).to_string()
    }

    pub fn clear(&mut self) {
        self.towns.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn town(id: &str) -> Town {
        Town::new(id, Point(0, 0))
    }

    #[test]
    fn town_identity_ignores_origin() {
        assert_eq!(Town::new("A", Point(1, 2)), Town::new("A", Point(30, 40)));
        assert_ne!(Town::new("A", Point(1, 2)), Town::new("a", Point(1, 2)));
    }

    #[test]
    fn add_town_keeps_first_origin() {
        let mut graph = Graph::new();
        assert!(graph.add_town(Town::new("A", Point(1, 2))));
        assert!(!graph.add_town(Town::new("A", Point(5, 5))));
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.town("A").map(Town::origin), Some(Point(1, 2)));
        assert!(graph.neighbours("A").unwrap().is_empty());
    }

    #[test]
    fn connect_is_symmetric_and_idempotent() {
        let mut graph = Graph::new();
        graph.connect(&town("A"), &town("B"));
        graph.connect(&town("B"), &town("A"));
        graph.connect(&town("A"), &town("B"));

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.edges_count(), 1);
        assert!(graph.neighbours("A").unwrap().contains("B"));
        assert!(graph.neighbours("B").unwrap().contains("A"));
        assert_eq!(graph.adjacency().count(), 2);
    }

    #[test]
    fn connect_to_self_is_noop() {
        let mut graph = Graph::new();
        graph.connect(&town("A"), &town("A"));
        assert!(graph.is_empty());

        graph.add_town(town("A"));
        assert_eq!(graph.connect_ids("A", "A"), Ok(()));
        assert!(graph.neighbours("A").unwrap().is_empty());
    }

    #[test]
    fn connect_keeps_stored_origin_in_neighbour_sets() {
        let mut graph = Graph::new();
        graph.add_town(Town::new("A", Point(1, 1)));
        graph.connect(&Town::new("A", Point(9, 9)), &Town::new("B", Point(2, 2)));

        let neighbour_of_b = graph.neighbours("B").unwrap().get("A").unwrap();
        assert_eq!(neighbour_of_b.origin(), Point(1, 1));
    }

    #[test]
    fn neighbours_of_unknown_vertex() {
        let graph = Graph::new();
        assert_eq!(graph.neighbours("nowhere"), Err(UnknownVertex { id: "nowhere".to_string(), }));
    }

    #[test]
    fn connect_ids_requires_both_vertices() {
        let mut graph = Graph::new();
        graph.add_town(town("A"));
        assert_eq!(graph.connect_ids("A", "B"), Err(UnknownVertex { id: "B".to_string(), }));
        assert_eq!(graph.connect_ids("C", "A"), Err(UnknownVertex { id: "C".to_string(), }));
        assert!(graph.neighbours("A").unwrap().is_empty());
    }

    #[test]
    fn clear_and_next_town_id() {
        let mut graph = Graph::new();
        assert_eq!(graph.next_town_id(), "1");
        graph.add_town(town("1"));
        graph.connect(&town("1"), &town("2"));
        assert_eq!(graph.next_town_id(), "3");

        graph.clear();
        assert!(graph.is_empty());
        assert_eq!(graph.edges_count(), 0);
        assert_eq!(graph.next_town_id(), "1");
    }
}
