use async_trait::async_trait;
use reqwest::{Client, Request, Url};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::app::MovieSource;
use crate::config::Config;
use crate::domain::Movie;
use crate::{poster, Error, Result};

/// Client for the OMDb title lookup.
pub struct Omdb {
    client: Client,
    api_key: String,
    base_url: Url,
    timeout: Duration,
}

impl Omdb {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            timeout: config.timeout,
        }
    }

    /// Builds `GET <base>?apikey=<key>&t=<title>`.  The query builder
    /// percent-encodes the title, so `&`, `#` and friends stay inside `t`.
    pub fn movie_request(&self, title: &str) -> Result<Request> {
        let request = self
            .client
            .get(self.base_url.clone())
            .query(&[("apikey", self.api_key.as_str()), ("t", title)])
            .timeout(self.timeout)
            .build()
            .map_err(without_url)?;

        Ok(request)
    }

    /// Looks a movie up by title.  OMDb reports "not found" and friends with
    /// a 200 and an `Error` field, so the status code isn't consulted.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_movie(&self, title: &str) -> Result<Movie> {
        let request = self.movie_request(title)?;
        let response = self
            .client
            .execute(request)
            .await
            .map_err(without_url)?;

        let status = response.status();
        let body = response.text().await.map_err(without_url)?;
        debug!("OMDb responded with {status}, {} bytes", body.len());

        let movie: Movie = serde_json::from_str(&body)?;
        if !movie.error.is_empty() {
            return Err(Error::Remote(movie.error));
        }

        info!("found {} ({})", movie.title, movie.year);
        Ok(movie)
    }

    pub async fn download_poster(&self, url: &str, dest: &Path) -> Result<u64> {
        poster::download(&self.client, url, dest, self.timeout).await
    }
}

// reqwest puts the request url in its errors, and ours carries the api key.
fn without_url(err: reqwest::Error) -> Error {
    Error::Network(err.without_url())
}

#[async_trait]
impl MovieSource for Omdb {
    async fn fetch_movie(&self, title: &str) -> Result<Movie> {
        Omdb::fetch_movie(self, title).await
    }

    async fn download_poster(&self, url: &str, dest: &Path) -> Result<u64> {
        Omdb::download_poster(self, url, dest).await
    }
}
