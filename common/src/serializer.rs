//! Plain text town map files.
//!
//! One record per line, tokens separated by a single space:
//!
//! ```text
//! Town <id> {<x> <y>}
//! Edge <id1> <id2>
//! ```
//!
//! A town must be declared before any edge mentions it. The writer emits
//! every undirected road twice (`Edge A B` and `Edge B A`), the reader
//! collapses them back into one symmetric adjacency.

use std::{
    fs,
    io::{
        self,
        BufRead,
        Write,
    },
    fmt,
    num,
    error,
    path::Path,
};

use crate::{
    graph,
};

const TOWN: &str = "Town";
const EDGE: &str = "Edge";

#[derive(Debug)]
pub enum ReadError {
    OpenFile(io::Error),
    ReadLine { line: usize, error: io::Error, },
    Malformed { line: usize, kind: MalformedKind, },
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum MalformedKind {
    UnknownRecord(String),
    TokenCount { expected: usize, found: usize, },
    InvalidTownId(String),
    BadCoordinates(String),
    Coordinate { token: String, error: num::ParseIntError, },
    UndeclaredTown(String),
    DuplicateTown(String),
}

#[derive(Debug)]
pub enum WriteError {
    InvalidTownId(String),
    CreateFile(io::Error),
    Write(io::Error),
}

/// Loads a map from `filename`. Nothing is returned on failure: the graph is
/// built aside and handed out only once the whole file has been accepted.
pub fn read<P>(filename: P) -> Result<graph::Graph, ReadError> where P: AsRef<Path> {
    let file = fs::File::open(filename.as_ref())
        .map_err(ReadError::OpenFile)?;
    let graph = read_from(io::BufReader::new(file))?;
    log::debug!(
        "map loaded from {:?}: {} towns, {} roads",
        filename.as_ref(),
        graph.len(),
        graph.edges_count(),
    );
    Ok(graph)
}

pub fn read_from<R>(reader: R) -> Result<graph::Graph, ReadError> where R: BufRead {
    let mut graph = graph::Graph::new();
    for (idx, maybe_line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = maybe_line
            .map_err(|error| ReadError::ReadLine { line: line_no, error, })?;
        apply_line(&mut graph, &line)
            .map_err(|kind| ReadError::Malformed { line: line_no, kind, })?;
    }
    Ok(graph)
}

fn apply_line(graph: &mut graph::Graph, line: &str) -> Result<(), MalformedKind> {
    let line = line.trim_end_matches('\r');
    if line.trim().is_empty() {
        return Ok(());
    }

    let mut split = line.splitn(2, ' ');
    let record = split.next().unwrap_or("");
    let rest = split.next();
    match record {
        TOWN => {
            let town = parse_town(rest.unwrap_or(""))?;
            let id = town.id().to_string();
            if !graph.add_town(town) {
                return Err(MalformedKind::DuplicateTown(id));
            }
            Ok(())
        },
        EDGE => {
            let tokens: Vec<&str> = rest.map_or_else(Vec::new, |rest| rest.split(' ').collect());
            match tokens.as_slice() {
                &[id_a, id_b] => {
                    if let Some(id) = [id_a, id_b].iter().find(|id| !is_valid_id(id)) {
                        return Err(MalformedKind::InvalidTownId(id.to_string()));
                    }
                    graph.connect_ids(id_a, id_b)
                        .map_err(|graph::UnknownVertex { id, }| MalformedKind::UndeclaredTown(id))
                },
                _ =>
                    Err(MalformedKind::TokenCount { expected: 3, found: tokens.len() + 1, }),
            }
        },
        other =>
            Err(MalformedKind::UnknownRecord(other.to_string())),
    }
}

/// Parses `<id> {<x> <y>}`, also accepting the compact `<id>{<x> <y>}`.
fn parse_town(rest: &str) -> Result<graph::Town, MalformedKind> {
    let brace = rest.find('{')
        .ok_or_else(|| MalformedKind::BadCoordinates(rest.to_string()))?;
    let (id, block) = rest.split_at(brace);
    let id = id.strip_suffix(' ').unwrap_or(id);
    if !is_valid_id(id) {
        return Err(MalformedKind::InvalidTownId(id.to_string()));
    }

    let coords: Vec<&str> = block
        .strip_prefix('{')
        .and_then(|block| block.strip_suffix('}'))
        .map(|inner| inner.split(' ').collect())
        .ok_or_else(|| MalformedKind::BadCoordinates(block.to_string()))?;
    match coords.as_slice() {
        &[x, y] =>
            Ok(graph::Town::new(id, graph::Point(parse_coordinate(x)?, parse_coordinate(y)?))),
        _ =>
            Err(MalformedKind::BadCoordinates(block.to_string())),
    }
}

fn parse_coordinate(token: &str) -> Result<i64, MalformedKind> {
    token.parse()
        .map_err(|error| MalformedKind::Coordinate { token: token.to_string(), error, })
}

/// Ids are written unescaped, so they cannot hold separators.
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && !id.chars().any(|c| c.is_whitespace() || c == '{' || c == '}')
}

/// Stores `graph` into `filename`. Ids are checked before the file is
/// touched; the file handle is released on every exit path.
pub fn write<P>(graph: &graph::Graph, filename: P) -> Result<(), WriteError> where P: AsRef<Path> {
    if let Some(town) = graph.vertices().find(|town| !is_valid_id(town.id())) {
        return Err(WriteError::InvalidTownId(town.id().to_string()));
    }

    let file = fs::File::create(filename.as_ref())
        .map_err(WriteError::CreateFile)?;
    let mut writer = io::BufWriter::new(file);
    write_to(graph, &mut writer)
        .map_err(WriteError::Write)?;
    writer.flush()
        .map_err(WriteError::Write)?;

    log::debug!(
        "map with {} towns and {} roads written to {:?}",
        graph.len(),
        graph.edges_count(),
        filename.as_ref(),
    );
    Ok(())
}

/// Emits the map sorted by id, so equal graphs always produce equal files.
pub fn write_to<W>(graph: &graph::Graph, writer: &mut W) -> io::Result<()> where W: Write {
    let mut towns: Vec<_> = graph.vertices().collect();
    towns.sort();
    for town in towns {
        let graph::Point(x, y) = town.origin();
        writeln!(writer, "{} {} {{{} {}}}", TOWN, town.id(), x, y)?;
    }

    let mut edges: Vec<_> = graph.adjacency().collect();
    edges.sort();
    for (town, neighbour) in edges {
        writeln!(writer, "{} {} {}", EDGE, town.id(), neighbour.id())?;
    }
    Ok(())
}

impl fmt::Display for MalformedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedKind::UnknownRecord(record) =>
                write!(f, "unknown record type {:?}", record),
            MalformedKind::TokenCount { expected, found, } =>
                write!(f, "expected {} tokens, found {}", expected, found),
            MalformedKind::InvalidTownId(id) =>
                write!(f, "invalid town id {:?}", id),
            MalformedKind::BadCoordinates(block) =>
                write!(f, "expected coordinates as {{<x> <y>}}, found {:?}", block),
            MalformedKind::Coordinate { token, error, } =>
                write!(f, "coordinate {:?} is not an integer: {}", token, error),
            MalformedKind::UndeclaredTown(id) =>
                write!(f, "edge references undeclared town {:?}", id),
            MalformedKind::DuplicateTown(id) =>
                write!(f, "town {:?} declared twice", id),
        }
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::OpenFile(error) =>
                write!(f, "error opening map file to read: {}", error),
            ReadError::ReadLine { line, error, } =>
                write!(f, "error reading map file at line {}: {}", line, error),
            ReadError::Malformed { line, kind, } =>
                write!(f, "malformed map file at line {}: {}", line, kind),
        }
    }
}

impl error::Error for ReadError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ReadError::OpenFile(error) | ReadError::ReadLine { error, .. } =>
                Some(error),
            ReadError::Malformed { .. } =>
                None,
        }
    }
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteError::InvalidTownId(id) =>
                write!(f, "town id {:?} cannot be stored in a map file", id),
            WriteError::CreateFile(error) =>
                write!(f, "error opening map file to write: {}", error),
            WriteError::Write(error) =>
                write!(f, "error writing map file: {}", error),
        }
    }
}

impl error::Error for WriteError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            WriteError::CreateFile(error) | WriteError::Write(error) =>
                Some(error),
            WriteError::InvalidTownId(..) =>
                None,
        }
    }
}
