#[macro_use]
extern crate smart_default;

mod context;
mod error;

pub use context::{build_http, ExtractionContext};
pub use error::ExtractionError;

pub use anyhow;
pub use async_trait::async_trait;
pub use reqwest;
pub use url;

use anyhow::Result;
use serde::Serialize;
use url::Url;

pub trait NewExtractor {
    fn new() -> Self;
}

pub trait URLMatcher {
    fn match_extractor(&self, url: &Url) -> bool;
}

#[async_trait]
pub trait RecordingExtractor: URLMatcher + Sync + Send {
    async fn extract_recording(
        &self,
        ctx: &ExtractionContext,
        url: &Url,
        wanted: &Extractable,
    ) -> Result<Extraction>;
}

/// What should be extracted from the service.
/// This is to limit the amount of requests made, based on what is needed.
#[derive(Default)]
pub struct Extractable {
    pub metadata: ExtractLevel,
    pub playback: ExtractLevel,
}

#[derive(Serialize, SmartDefault, PartialEq, Debug)]
pub enum ExtractLevel {
    #[default]
    None,
    Basic,
    Extended,
}

#[derive(Default, Debug)]
pub struct Extraction {
    pub metadata: Option<MediaMetadata>,
    pub playback: Option<MediaPlayback>,
}

#[derive(Serialize, Default, PartialEq, Clone, Debug)]
pub struct MediaMetadata {
    pub id: String,
    pub title: Option<String>,
}

#[derive(Serialize, PartialEq, Clone, Debug)]
pub struct MediaPlayback {
    pub formats: Vec<MediaFormat>,
}

/// A single directly fetchable rendition of the media, under a
/// human-meaningful label ("720p").
#[derive(Serialize, PartialEq, Clone, Debug)]
pub struct MediaFormat {
    pub id: String,
    pub breed: FormatBreed,
    pub url: Url,
    pub video_details: Option<VideoDetails>,
}

/// Format type
#[derive(Serialize, SmartDefault, PartialEq, Clone, Debug)]
pub enum FormatBreed {
    #[default]
    AudioVideo,
    Video,
    Audio,
}

#[derive(Serialize, SmartDefault, PartialEq, Clone, Debug)]
pub struct VideoDetails {
    pub width: Option<u32>,
    pub height: Option<u32>,
}
