use std::{
    fs,
    io::{
        self,
        Write,
    },
    path::Path,
};

use serde_derive::{
    Serialize,
    Deserialize,
};

use crate::{
    graph,
    solver,
};

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Report {
    pub towns_count: usize,
    pub edges_count: usize,
    pub rounds: usize,
    pub stations: Vec<Station>,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Station {
    pub id: String,
    pub origin: graph::Point,
}

#[derive(Debug)]
pub enum FromFileError {
    OpenFile(io::Error),
    Deserialize(serde_json::Error),
}

#[derive(Debug)]
pub enum WriteFileError {
    CreateFile(io::Error),
    Serialize(serde_json::Error),
    Flush(io::Error),
}

impl Report {
    pub fn new(graph: &graph::Graph, solution: &solver::greedy::Solution) -> Report {
        Report {
            towns_count: graph.len(),
            edges_count: graph.edges_count(),
            rounds: solution.rounds,
            stations: solution.stations
                .iter()
                .map(|town| Station {
                    id: town.id().to_string(),
                    origin: town.origin(),
                })
                .collect(),
        }
    }

    pub fn from_file<P>(filename: P) -> Result<Report, FromFileError> where P: AsRef<Path> {
        let file = fs::File::open(filename)
            .map_err(FromFileError::OpenFile)?;
        let reader = io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(FromFileError::Deserialize)
    }

    pub fn write_to_file<P>(&self, filename: P) -> Result<(), WriteFileError> where P: AsRef<Path> {
        let file = fs::File::create(filename)
            .map_err(WriteFileError::CreateFile)?;
        let mut writer = io::BufWriter::new(file);
        serde_json::to_writer(&mut writer, self)
            .map_err(WriteFileError::Serialize)?;
        writer.flush()
            .map_err(WriteFileError::Flush)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::graph::{
        Graph,
        Point,
        Town,
    };

    #[test]
    fn report_from_star() {
        let mut graph = Graph::new();
        let center = Town::new("X", Point(50, 50));
        for (idx, leaf) in ["L1", "L2", "L3"].iter().enumerate() {
            graph.connect(&center, &Town::new(*leaf, Point(idx as i64, 0)));
        }
        let solution = solver::greedy::GreedySolver::new(&graph).solve();
        let report = Report::new(&graph, &solution);

        assert_eq!(report, Report {
            towns_count: 4,
            edges_count: 3,
            rounds: 1,
            stations: vec![Station { id: "X".to_string(), origin: Point(50, 50), }],
        });
    }

    #[test]
    fn serialize_report() {
        let report = Report {
            towns_count: 1,
            edges_count: 0,
            rounds: 1,
            stations: vec![Station { id: "Z".to_string(), origin: Point(-3, 7), }],
        };
        let data = r#"{"towns_count":1,"edges_count":0,"rounds":1,"stations":[{"id":"Z","origin":[-3,7]}]}"#;
        assert_eq!(serde_json::to_string(&report).unwrap(), data);
        assert_eq!(serde_json::from_str::<Report>(data).unwrap(), report);
    }

    #[test]
    fn report_file_io() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1.report");
        let report = Report {
            towns_count: 0,
            edges_count: 0,
            rounds: 0,
            stations: vec![],
        };
        report.write_to_file(&path).unwrap();
        assert_eq!(Report::from_file(&path).unwrap(), report);

        assert!(matches!(
            Report::from_file(dir.path().join("missing.report")),
            Err(FromFileError::OpenFile(ref error)) if error.kind() == io::ErrorKind::NotFound,
        ));
    }
}
