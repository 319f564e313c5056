use clap::{Arg, Command};
use geojson_splitter::{split, SplitConfig};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("GeoJSON Splitter")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Jesper Fjellin")
        .about("Splits a GeoJSON feature collection into two files at the midpoint of its features")
        .arg(
            Arg::new("input")
                .num_args(1)
                .help("Input GeoJSON file (defaults to export.geojson)"),
        )
        .arg(
            Arg::new("output-dir")
                .short('o')
                .long("output-dir")
                .num_args(1)
                .help("Directory for the output files (defaults to the input file's directory)"),
        )
        .arg(
            Arg::new("prefix")
                .short('p')
                .long("prefix")
                .num_args(1)
                .help("File name prefix for the two halves (defaults to export)"),
        )
        .get_matches();

    let mut config = match matches.get_one::<String>("input") {
        Some(input) => SplitConfig::new(input),
        None => SplitConfig::default(),
    };
    if let Some(prefix) = matches.get_one::<String>("prefix") {
        config = config.with_prefix(prefix);
    }
    if let Some(dir) = matches.get_one::<String>("output-dir") {
        config = config.with_output_dir(dir);
    }

    match split(&config) {
        Ok(report) => println!(
            "GeoJSON split successfully: {}, {}",
            report.part1.display(),
            report.part2.display()
        ),
        // Missing 'features' is an expected input problem, not a failure
        Err(e) if e.is_recoverable() => println!("{}", e),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
