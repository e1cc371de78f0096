use futures::StreamExt;
use reqwest::{Client, Response};
use std::path::Path;
use std::time::Duration;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

use crate::{Error, Result};

const EXTENSION: &str = "jpg";

/// Downloads `url` into `dest`, returning the number of bytes written.
///
/// The status is checked before `dest` is touched, so a failed request never
/// leaves a file behind.  If the transfer fails partway the partial file is
/// removed.
#[tracing::instrument(skip(client))]
pub async fn download(client: &Client, url: &str, dest: &Path, timeout: Duration) -> Result<u64> {
    let response = client.get(url).timeout(timeout).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Remote(format!("downloading poster failed: {status}")));
    }

    let mut file = File::create(dest)
        .await
        .map_err(|source| io_error("create", dest, source))?;

    match write_body(response, &mut file, dest).await {
        Ok(written) => {
            info!("saved {written} bytes to {}", dest.display());
            Ok(written)
        }
        Err(e) => {
            drop(file);
            if let Err(remove_err) = fs::remove_file(dest).await {
                warn!("failed to remove partial poster {}: {remove_err}", dest.display());
            }
            Err(e)
        }
    }
}

async fn write_body(response: Response, file: &mut File, dest: &Path) -> Result<u64> {
    let mut body = response.bytes_stream();
    let mut written = 0;

    while let Some(chunk) = body.next().await {
        let chunk = chunk?;
        file.write_all(&chunk)
            .await
            .map_err(|source| io_error("write", dest, source))?;
        written += chunk.len() as u64;
    }

    // tokio buffers writes in the background, this waits for them to land.
    file.flush()
        .await
        .map_err(|source| io_error("flush", dest, source))?;

    Ok(written)
}

fn io_error(operation: &'static str, path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        operation,
        path: path.display().to_string(),
        source,
    }
}

/// Names the poster file after the movie title, e.g. "Inception.jpg".
/// Characters that can't appear in a file name become underscores.
pub fn file_name(title: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if stem.is_empty() {
        format!("poster.{EXTENSION}")
    } else {
        format!("{stem}.{EXTENSION}")
    }
}
