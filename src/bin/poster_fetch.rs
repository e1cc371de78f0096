use movie_lookup::{app, config, poster};
use std::env;
use std::path::Path;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    app::init_tracing();

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Expected exactly two arguments (poster url, destination file), had: {args:?}");
        std::process::exit(1);
    }

    let url = &args[1];
    let dest = Path::new(&args[2]);

    let timeout = match config::timeout_from_env() {
        Ok(timeout) => timeout,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    match poster::download(&reqwest::Client::new(), url, dest, timeout).await {
        Ok(written) => println!("Saved {written} bytes to {}", dest.display()),
        Err(e) => {
            eprintln!("Error downloading poster: {e}");
            std::process::exit(1);
        }
    }
}
