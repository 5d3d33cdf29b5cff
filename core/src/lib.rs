use fbdown_extractor_api::anyhow::Result;
use fbdown_extractor_api::url::Url;
pub use fbdown_extractor_api::*;
use once_cell::sync::Lazy;

#[cfg(feature = "download")]
pub use fbdown_download_http::{
    DownloadError, DownloadProgress, HTTPDownloadOptions, HTTPDownloader,
};
#[cfg(feature = "facebook")]
pub use fbdown_extractor_facebook::{extract_video_id, output_filename};

pub static DEFAULT_EXTRACTOR_LIST: Lazy<Vec<&'static Box<dyn RecordingExtractor>>> =
    Lazy::new(|| {
        let l = vec![].into_iter();

        #[cfg(feature = "facebook")]
        let l = l.chain(fbdown_extractor_facebook::EXTRACTORS.iter());

        l.collect()
    });

pub struct CoreClient<'a> {
    extractors: Vec<&'a Box<dyn RecordingExtractor>>,
    context: ExtractionContext,
}

impl CoreClient<'_> {
    pub fn new() -> Self {
        CoreClient {
            extractors: DEFAULT_EXTRACTOR_LIST.to_vec(),
            context: ExtractionContext::new(),
        }
    }

    pub fn context(&self) -> &ExtractionContext {
        &self.context
    }

    /// Routes the URL to the first matching extractor.
    /// `Ok(None)` means no extractor recognized the URL.
    pub async fn extract_url(
        &self,
        url: &Url,
        wanted: &Extractable,
    ) -> Result<Option<Extraction>> {
        for extractor in &self.extractors {
            if extractor.match_extractor(url) {
                return extractor
                    .extract_recording(&self.context, url, wanted)
                    .await
                    .map(Option::Some);
            }
        }
        Ok(None)
    }
}

impl Default for CoreClient<'_> {
    fn default() -> Self {
        Self::new()
    }
}
