use std::path::{Path, PathBuf};

use fbdown_extractor_api::reqwest::header;
use fbdown_extractor_api::reqwest::Response;
use fbdown_extractor_api::url::Url;
use fbdown_extractor_api::ExtractionContext;
use futures::StreamExt;
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("network failure while downloading: {0}")]
    Network(#[from] fbdown_extractor_api::reqwest::Error),
    #[error("could not write the output file: {0}")]
    Io(#[from] std::io::Error),
}

/// Byte progress of a running download.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct DownloadProgress {
    pub written: u64,
    /// server-declared length, absent without a Content-Length header
    pub total: Option<u64>,
}

impl DownloadProgress {
    /// Fraction done, only computable when the server declared a usable
    /// length.
    pub fn fraction(&self) -> Option<f64> {
        match self.total {
            Some(total) if total > 0 => Some(self.written as f64 / total as f64),
            _ => None,
        }
    }
}

#[derive(Default)]
pub struct HTTPDownloadOptions {
    pub user_agent: Option<String>,
}

pub struct HTTPDownloader {}

impl HTTPDownloader {
    pub fn new() -> Self {
        Self {}
    }

    /// Streams `url` into `output`, overwriting it on completion.
    /// Bytes land in a sibling `.part` file first; the target is only
    /// renamed into place once the transfer finished, and the partial
    /// file is removed on failure.
    pub async fn download_format<P, F>(
        &self,
        ctx: &ExtractionContext,
        url: &Url,
        options: &HTTPDownloadOptions,
        output: P,
        mut progress: F,
    ) -> Result<PathBuf, DownloadError>
    where
        P: AsRef<Path>,
        F: FnMut(DownloadProgress),
    {
        let output = output.as_ref();
        let mut request = ctx.http.get(url.clone());
        if let Some(ua) = &options.user_agent {
            request = request.header(header::USER_AGENT, ua);
        }
        let response = request.send().await?.error_for_status()?;
        let total = response.content_length();
        debug!("downloading {} -> {} ({:?} bytes)", url, output.display(), total);

        let part = partial_path(output);
        match write_body(response, &part, total, &mut progress).await {
            Ok(()) => {
                fs::rename(&part, output).await?;
                Ok(output.to_path_buf())
            }
            Err(e) => {
                let _ = fs::remove_file(&part).await;
                Err(e)
            }
        }
    }
}

impl Default for HTTPDownloader {
    fn default() -> Self {
        Self::new()
    }
}

async fn write_body<F>(
    response: Response,
    part: &Path,
    total: Option<u64>,
    progress: &mut F,
) -> Result<(), DownloadError>
where
    F: FnMut(DownloadProgress),
{
    let mut file = fs::File::create(part).await?;
    let mut written = 0u64;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
        progress(DownloadProgress { written, total });
    }
    file.flush().await?;
    Ok(())
}

fn partial_path(output: &Path) -> PathBuf {
    let mut path = output.as_os_str().to_os_string();
    path.push(".part");
    PathBuf::from(path)
}
