use std::{
    path::PathBuf,
};

use structopt::{
    clap::{
        AppSettings,
    },
    StructOpt,
};

#[derive(Clone, StructOpt, Debug)]
#[structopt(setting = AppSettings::DeriveDisplayOrder)]
#[structopt(setting = AppSettings::AllowLeadingHyphen)]
pub struct CommonCliArgs {
    /// file with town map
    #[structopt(long = "map-file", default_value = "./maps/1.map")]
    pub map_file: PathBuf,
    /// file to write solution report to
    #[structopt(long = "report-file", default_value = "./reports/1.report")]
    pub report_file: PathBuf,
}
