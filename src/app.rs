use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[cfg(test)]
use mockall::automock;

use crate::domain::Movie;
use crate::{poster, Error, Result};

/// Where movies and posters come from.  `Omdb` is the real one.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MovieSource {
    async fn fetch_movie(&self, title: &str) -> Result<Movie>;
    async fn download_poster(&self, url: &str, dest: &Path) -> Result<u64>;
}

/// Says which half of a lookup failed.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Error fetching movie data: {0}")]
    Metadata(Error),

    #[error("Fetched metadata for {title}, but the poster download failed: {error}")]
    Poster { title: String, error: Error },

    #[error("Error writing output: {0}")]
    Output(std::io::Error),
}

/// One invocation: fetch a title, print it, maybe save its poster.
pub struct Lookup {
    pub title: String,

    /// Directory to save the poster in, `None` skips the download.
    pub poster_dir: Option<PathBuf>,
}

impl Lookup {
    /// Joins command line words into a single title.
    pub fn new(words: &[String], poster_dir: Option<PathBuf>) -> Self {
        Self {
            title: words.join(" "),
            poster_dir,
        }
    }

    pub async fn run(
        &self,
        source: &impl MovieSource,
        out: &mut impl Write,
    ) -> std::result::Result<(), LookupError> {
        let movie = source
            .fetch_movie(&self.title)
            .await
            .map_err(LookupError::Metadata)?;

        write!(out, "{movie}").map_err(LookupError::Output)?;
        out.flush().map_err(LookupError::Output)?;

        let Some(dir) = &self.poster_dir else {
            return Ok(());
        };

        let poster_failed = |error: Error| LookupError::Poster {
            title: movie.title.clone(),
            error,
        };

        if !movie.has_poster() {
            warn!("no poster for {}", movie.title);
            return Err(poster_failed(Error::NoPoster(movie.title.clone())));
        }

        let dest = dir.join(poster::file_name(&movie.title));
        let written = source
            .download_poster(&movie.poster, &dest)
            .await
            .map_err(poster_failed)?;
        info!("poster is {written} bytes");

        writeln!(
            out,
            "Poster for {} downloaded as {}",
            movie.title,
            dest.display()
        )
        .map_err(LookupError::Output)?;

        Ok(())
    }
}

/// Logs go to stderr so stdout only carries the movie.  `RUST_LOG`
/// overrides the default level of warn.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
