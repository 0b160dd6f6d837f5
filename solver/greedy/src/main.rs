use std::{
    path::PathBuf,
};

use structopt::{
    StructOpt,
};

use common::{
    cli,
    report,
    solver,
    stations,
    serializer,
};

#[derive(Clone, StructOpt, Debug)]
pub struct CliArgs {
    #[structopt(flatten)]
    pub common: cli::CommonCliArgs,

    /// do not write solution report
    #[structopt(long = "no-report")]
    pub no_report: bool,
    /// store loaded map back in normalized form to this file
    #[structopt(long = "output-map-file")]
    pub output_map_file: Option<PathBuf>,
}

#[derive(Debug)]
pub enum Error {
    MapLoad(serializer::ReadError),
    MapStore(serializer::WriteError),
    ReportExport(report::WriteFileError),
    NotDominated { towns: Vec<String>, },
}

fn main() -> Result<(), Error> {
    pretty_env_logger::init();
    let cli_args = CliArgs::from_args();
    log::info!("program starts as: {:?}", cli_args);

    let graph = serializer::read(&cli_args.common.map_file)
        .map_err(Error::MapLoad)?;
    log::debug!(" ;; map loaded: {} towns, {} roads", graph.len(), graph.edges_count());

    let solution = solver::greedy::GreedySolver::new(&graph).solve();
    let missed = solver::undominated(&graph, &solution.stations);
    if !missed.is_empty() {
        return Err(Error::NotDominated {
            towns: missed.into_iter().map(|town| town.id().to_string()).collect(),
        });
    }
    log::info!(
        "{} stations placed for {} towns in {} rounds",
        solution.stations.len(),
        graph.len(),
        solution.rounds,
    );

    let mut flags = stations::StationFlags::new();
    flags.refresh(&graph, &solution.stations);
    let mut towns: Vec<_> = flags.iter(&graph).collect();
    towns.sort();
    for (town, _has_station) in towns {
        println!("{} {:?}", flags.label(town), town.origin());
    }

    if !cli_args.no_report {
        let report = report::Report::new(&graph, &solution);
        report.write_to_file(&cli_args.common.report_file)
            .map_err(Error::ReportExport)?;
        log::info!("report has been written to {:?}", cli_args.common.report_file);
    }

    if let Some(ref output_map_file) = cli_args.output_map_file {
        serializer::write(&graph, output_map_file)
            .map_err(Error::MapStore)?;
        log::info!("map has been written to {:?}", output_map_file);
    }

    Ok(())
}
