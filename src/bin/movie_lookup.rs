use anyhow::Context;
use clap::Parser;
use movie_lookup::app::{self, Lookup};
use movie_lookup::config::Config;
use movie_lookup::omdb::Omdb;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

/// Look up a movie on OMDb by title and optionally download its poster.
#[derive(Parser, Debug)]
#[command(name = "movie_lookup", version, about)]
struct Args {
    /// Also download the poster, saved as "<title>.jpg"
    #[arg(long)]
    poster: bool,

    /// Directory to save the poster in
    #[arg(long, default_value = ".", requires = "poster")]
    dir: PathBuf,

    /// Movie title, multiple words are joined with spaces
    #[arg(required = true)]
    title: Vec<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    app::init_tracing();
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    // Resolved before anything touches the network or stdout.
    let config = Config::from_env()?;

    let omdb = Omdb::new(reqwest::Client::new(), &config);
    let lookup = Lookup::new(&args.title, args.poster.then_some(args.dir));

    lookup
        .run(&omdb, &mut io::stdout().lock())
        .await
        .with_context(|| format!("Lookup of \"{}\" failed", lookup.title))
}
