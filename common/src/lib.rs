pub mod cli;
pub mod graph;
pub mod report;
pub mod solver;
pub mod stations;
pub mod generator;
pub mod serializer;
