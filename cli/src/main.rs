use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use fbdown::{
    output_filename, CoreClient, ExtractLevel, Extractable, HTTPDownloadOptions, HTTPDownloader,
    MediaFormat,
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// facebook video page url
    #[arg()]
    url: String,

    /// quality label to fetch ("720p"); omit to list what is available
    #[arg(short, long)]
    quality: Option<String>,

    /// print the direct media url instead of downloading
    #[arg(long)]
    link: bool,

    /// directory downloads are saved into
    #[arg(short, long, default_value = "downloads")]
    output_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let url = Url::parse(&args.url)?;

    let client = CoreClient::new();

    println!("extracting {}", &url);
    let extraction = client
        .extract_url(
            &url,
            &Extractable {
                metadata: ExtractLevel::Basic,
                playback: ExtractLevel::Extended,
            },
        )
        .await?
        .ok_or_else(|| anyhow!("not a recognized facebook video url: {}", url))?;

    let playback = extraction
        .playback
        .ok_or_else(|| anyhow!("could not get video info"))?;

    let wanted = match &args.quality {
        Some(wanted) => wanted,
        None => {
            for fmt in &playback.formats {
                println!("{}: {}", &fmt.id, &fmt.url);
            }
            return Ok(());
        }
    };

    let format = playback
        .formats
        .iter()
        .find(|f| &f.id == wanted)
        .ok_or_else(|| anyhow!("no {} rendition, available: {}", wanted, labels(&playback.formats)))?;

    if args.link {
        println!("{}", format.url);
        return Ok(());
    }

    std::fs::create_dir_all(&args.output_dir)?;
    let output = args.output_dir.join(output_filename(&url, &format.id));

    let bar = ProgressBar::new_spinner();
    bar.set_style(ProgressStyle::with_template("{bytes} {binary_bytes_per_sec}").unwrap());
    let saved = HTTPDownloader::new()
        .download_format(
            client.context(),
            &format.url,
            &HTTPDownloadOptions::default(),
            &output,
            |progress| {
                if let Some(total) = progress.total {
                    if bar.length() != Some(total) {
                        bar.set_style(
                            ProgressStyle::with_template(
                                "{wide_bar} {bytes}/{total_bytes} ({percent}%)",
                            )
                            .unwrap(),
                        );
                        bar.set_length(total);
                    }
                }
                bar.set_position(progress.written);
            },
        )
        .await?;
    bar.finish_and_clear();

    println!("saved as {}", saved.display());
    Ok(())
}

fn labels(formats: &[MediaFormat]) -> String {
    formats
        .iter()
        .map(|f| f.id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
