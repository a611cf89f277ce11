// tokagen: build the reactor model, export STL bodies, inject deck records.

use std::path::{Path, PathBuf};
use std::process;

use tokagen::assembly::{Assembly, AssemblyOptions};
use tokagen::deck::Deck;
use tokagen::errors::Result;
use tokagen::export::Exporter;
use tokagen::params::ReactorParameters;
use tokagen::reactor::{DEFAULT_SEGMENTS, Reactor};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let mut config_path = PathBuf::from("data/reactor_config.txt");
    let mut out_dir = PathBuf::from("stl");
    let mut deck_path: Option<PathBuf> = None;
    let mut deck_out: Option<PathBuf> = None;
    let mut options = AssemblyOptions::default();
    let mut segments = DEFAULT_SEGMENTS;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                config_path = PathBuf::from(&args[i]);
            }
            "--out" => {
                i += 1;
                out_dir = PathBuf::from(&args[i]);
            }
            "--deck" => {
                i += 1;
                deck_path = Some(PathBuf::from(&args[i]));
            }
            "--deck-out" => {
                i += 1;
                deck_out = Some(PathBuf::from(&args[i]));
            }
            "--body-line" => {
                i += 1;
                options.body_line = args[i].parse().expect("invalid --body-line value");
            }
            "--detector-line" => {
                i += 1;
                options.detector_line = args[i].parse().expect("invalid --detector-line value");
            }
            "--scale" => {
                i += 1;
                options.scale = args[i].parse().expect("invalid --scale value");
            }
            "--segments" => {
                i += 1;
                segments = args[i].parse().expect("invalid --segments value");
            }
            "--help" | "-h" => {
                eprintln!("Usage: tokagen [OPTIONS]");
                eprintln!("  --config <path>       Reactor configuration (default: data/reactor_config.txt)");
                eprintln!("  --out <dir>           STL output directory (default: stl)");
                eprintln!("  --deck <path>         Simulation deck to inject records into");
                eprintln!("  --deck-out <path>     Where to write the injected deck (default: in place)");
                eprintln!("  --body-line <n>       Deck line for reactor-body records (default: 28)");
                eprintln!("  --detector-line <n>   Deck line for detector records (default: 68)");
                eprintln!("  --scale <f>           Scale written into file records (default: 1)");
                eprintln!("  --segments <n>        Angular tessellation of round bodies (default: 64)");
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                process::exit(2);
            }
        }
        i += 1;
    }

    if let Err(err) = run(
        &config_path,
        &out_dir,
        deck_path.as_deref(),
        deck_out.as_deref(),
        options,
        segments,
    ) {
        log::error!("{err}");
        process::exit(1);
    }
}

fn run(
    config_path: &Path,
    out_dir: &Path,
    deck_path: Option<&Path>,
    deck_out: Option<&Path>,
    options: AssemblyOptions,
    segments: usize,
) -> Result<()> {
    let params = ReactorParameters::from_config(config_path)?;
    log::info!(
        "loaded configuration: {} containment layers, {} ports, {} limbs",
        params.containment.nr_layers(),
        params.ports.nr_ports,
        params.limbs.nr_limbs
    );

    let reactor = Reactor::new(params).with_segments(segments);
    let exporter = Exporter::new(out_dir)?;

    let mut deck = match deck_path {
        Some(path) => Deck::open(path)?,
        None => Deck::from_text(""),
    };

    Assembly::new(&reactor, exporter, options).run(&mut deck)?;

    if let Some(path) = deck_out.or(deck_path) {
        deck.save(path)?;
        log::info!("deck written to {}", path.display());
    }
    Ok(())
}
