use std::{
    path::PathBuf,
};

use structopt::{
    StructOpt,
};

use rand::{
    SeedableRng,
    rngs::StdRng,
};

use common::{
    generator,
    serializer,
};

#[derive(Clone, StructOpt, Debug)]
pub struct CliArgs {
    /// output map file
    #[structopt(long = "map-file", default_value = "./maps/1.map")]
    pub map_file: PathBuf,

    /// towns count
    #[structopt(long = "towns-count", default_value = "16")]
    pub towns_count: usize,
    /// probability of a road between two towns [0.0 - 1.0]
    #[structopt(long = "edge-probability", default_value = "0.15")]
    pub edge_probability: f64,
    /// field width
    #[structopt(long = "width", default_value = "640")]
    pub width: i64,
    /// field height
    #[structopt(long = "height", default_value = "320")]
    pub height: i64,
    /// random seed (random if omitted)
    #[structopt(long = "seed")]
    pub seed: Option<u64>,
}

#[derive(Debug)]
pub enum Error {
    MapStore(serializer::WriteError),
}

fn main() -> Result<(), Error> {
    pretty_env_logger::init();
    let cli_args = CliArgs::from_args();
    log::info!("program starts as: {:?}", cli_args);

    let mut rng = match cli_args.seed {
        Some(seed) =>
            StdRng::seed_from_u64(seed),
        None =>
            StdRng::from_entropy(),
    };

    let graph = generator::generate(&mut rng, &generator::Params {
        towns_count: cli_args.towns_count,
        edge_probability: cli_args.edge_probability,
        width: cli_args.width,
        height: cli_args.height,
    });

    serializer::write(&graph, &cli_args.map_file)
        .map_err(Error::MapStore)?;
    log::info!(
        "map with {} towns and {} roads has been written to {:?}",
        graph.len(),
        graph.edges_count(),
        cli_args.map_file,
    );

    Ok(())
}
