//! Monument probe
//!
//! Loads a world snapshot, builds the landmark index and prints the
//! location report for each point given on the command line.
//!
//! ```text
//! monument_probe [--config <file>] <snapshot.ron|toml> [x y z]...
//! ```

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use monument_index::foundation::logging;
use monument_index::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
enum ProbeError {
    #[error(transparent)]
    Cli(#[from] clap::Error),

    #[error("coordinates come in groups of three, got {0} values")]
    IncompleteTriple(usize),
}

struct ProbeArgs {
    snapshot: String,
    config: Option<String>,
    points: Vec<Point3>,
}

fn cli() -> Command {
    Command::new("monument_probe")
        .about("Builds the landmark index for a world snapshot and reports where points are")
        .arg(
            Arg::new("snapshot")
                .value_name("SNAPSHOT")
                .help("World snapshot file (.ron or .toml)")
                .required(true),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Index configuration file (.toml or .ron)"),
        )
        .arg(
            Arg::new("points")
                .value_name("COORD")
                .help("Points to locate, three coordinates each")
                .num_args(0..)
                .action(ArgAction::Append)
                .allow_negative_numbers(true)
                .value_parser(value_parser!(f32)),
        )
}

impl ProbeArgs {
    fn from_matches(matches: &ArgMatches) -> Result<Self, ProbeError> {
        let values: Vec<f32> = matches
            .get_many::<f32>("points")
            .map(|v| v.copied().collect())
            .unwrap_or_default();

        if values.len() % 3 != 0 {
            return Err(ProbeError::IncompleteTriple(values.len()));
        }

        let points = values
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]))
            .collect();

        Ok(Self {
            snapshot: matches
                .get_one::<String>("snapshot")
                .cloned()
                .unwrap_or_default(),
            config: matches.get_one::<String>("config").cloned(),
            points,
        })
    }
}

fn parse_args<I, T>(args: I) -> Result<ProbeArgs, ProbeError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = cli().try_get_matches_from(args)?;
    ProbeArgs::from_matches(&matches)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let args = match parse_args(std::env::args_os()) {
        Err(ProbeError::Cli(e)) => e.exit(),
        other => other?,
    };

    let mut service = match &args.config {
        Some(path) => MonumentService::from_config_file(path)?,
        None => MonumentService::new(MonumentIndexConfig::default())?,
    };

    let index = service.load_snapshot_file(&args.snapshot)?;
    println!("{}", index.report());

    if args.points.is_empty() {
        for feature in index.all() {
            let p = feature.position();
            println!(
                "{:<16} {:<32} ({:.1}, {:.1}, {:.1})",
                feature.kind().to_string(),
                feature.display_name(),
                p.x,
                p.y,
                p.z
            );
        }
        return Ok(());
    }

    for point in &args.points {
        log::debug!("Probing ({}, {}, {})", point.x, point.y, point.z);
        println!("({:.1}, {:.1}, {:.1}): {}", point.x, point.y, point.z, where_am_i(&index, point));
    }

    Ok(())
}
