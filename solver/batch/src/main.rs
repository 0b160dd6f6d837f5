use std::{
    fs,
    io,
    path::{
        PathBuf,
        Component,
    },
};

use structopt::{
    StructOpt,
};

use rayon::prelude::*;

use common::{
    report,
    solver,
    serializer,
};

#[derive(Clone, StructOpt, Debug)]
pub struct CliArgs {
    /// input directory with maps
    #[structopt(long = "maps-directory", default_value = "./maps")]
    pub maps_directory: PathBuf,
    /// output directory for reports
    #[structopt(long = "reports-directory", default_value = "./reports")]
    pub reports_directory: PathBuf,
    /// worker threads count (0 for one per cpu)
    #[structopt(long = "worker-threads-count", default_value = "0")]
    pub worker_threads_count: usize,
}

#[derive(Debug)]
pub enum Error {
    FsReadDir { directory: PathBuf, error: io::Error, },
    FsDirEntry { directory: PathBuf, error: io::Error, },
    ThreadPoolBuild(rayon::ThreadPoolBuildError),
    MapLoad { map_file: PathBuf, error: serializer::ReadError, },
    ReportExport { report_file: PathBuf, error: report::WriteFileError, },
    TasksFailed { failed: usize, total: usize, },
}

#[derive(Debug)]
struct MapDesc {
    map_file: PathBuf,
    report_file: PathBuf,
    task_id: String,
}

fn main() -> Result<(), Error> {
    pretty_env_logger::init();
    let cli_args = CliArgs::from_args();
    log::info!("program starts as: {:?}", cli_args);

    let maps = sync_maps_directory(&cli_args)?;
    let total = maps.len();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(cli_args.worker_threads_count)
        .build()
        .map_err(Error::ThreadPoolBuild)?;
    // every task owns the graph it loads, nothing is shared between workers
    let results: Vec<Result<String, Error>> = pool.install(|| {
        maps.par_iter()
            .map(run_task)
            .collect()
    });

    let mut failed = 0;
    for result in results {
        match result {
            Ok(task_id) =>
                log::debug!("task {} done", task_id),
            Err(error) => {
                log::error!("task failed: {:?}", error);
                failed += 1;
            },
        }
    }

    log::info!("directory processing finished, {} of {} tasks done", total - failed, total);
    if failed > 0 {
        return Err(Error::TasksFailed { failed, total, });
    }
    Ok(())
}

fn run_task(map_desc: &MapDesc) -> Result<String, Error> {
    let graph = serializer::read(&map_desc.map_file)
        .map_err(|error| Error::MapLoad { map_file: map_desc.map_file.clone(), error, })?;

    let solution = solver::greedy::GreedySolver::new(&graph).solve();
    log::info!(
        "STATIONS: {} | task {} solved for {} towns in {} rounds",
        solution.stations.len(),
        map_desc.task_id,
        graph.len(),
        solution.rounds,
    );

    report::Report::new(&graph, &solution)
        .write_to_file(&map_desc.report_file)
        .map_err(|error| Error::ReportExport { report_file: map_desc.report_file.clone(), error, })?;
    Ok(map_desc.task_id.clone())
}

fn sync_maps_directory(cli_args: &CliArgs) -> Result<Vec<MapDesc>, Error> {
    let mut maps = Vec::new();

    let dir_entries = fs::read_dir(&cli_args.maps_directory)
        .map_err(|error| Error::FsReadDir { directory: cli_args.maps_directory.clone(), error, })?;
    for maybe_dir_entry in dir_entries {
        let dir_entry = maybe_dir_entry
            .map_err(|error| Error::FsDirEntry { directory: cli_args.maps_directory.clone(), error, })?;
        let map_path = dir_entry.path();
        if let Some(Component::Normal(map_file)) = map_path.components().last() {
            if let Some(map_file_str) = map_file.to_str() {
                let mut split_iter = map_file_str.split('.');
                if let (Some(task_id), Some("map"), None) = (split_iter.next(), split_iter.next(), split_iter.next()) {
                    let mut report_file = cli_args.reports_directory.clone();
                    report_file.push(format!("{}.report", task_id));

                    maps.push(MapDesc {
                        task_id: task_id.to_string(),
                        map_file: map_path.clone(),
                        report_file,
                    });
                }
            }
        }
    }
    maps.sort_by(|a, b| a.task_id.cmp(&b.task_id));
    Ok(maps)
}
