use nipper::Document;
use once_cell::sync::Lazy;
use regex::Regex;

use fbdown_extractor_api::anyhow::Result;
use fbdown_extractor_api::reqwest::header;
use fbdown_extractor_api::url::Url;
use fbdown_extractor_api::{
    async_trait, Extractable, Extraction, ExtractionContext, ExtractionError, FormatBreed,
    MediaFormat, MediaMetadata, MediaPlayback, NewExtractor, RecordingExtractor, URLMatcher,
    VideoDetails,
};
use tracing::{debug, warn};

use crate::common::{_has_video_path, _is_facebook, _is_fb_watch, extract_video_id};
use crate::types::web_fragments::VideoData;

// the mobile markup embeds the metadata inline, the desktop markup does not
const MOBILE_USER_AGENT: &str =
    "Mozilla/5.0 (iPhone; CPU iPhone OS 12_2 like Mac OS X) AppleWebKit/605.1.15";

/// search anchor for the inline metadata, positioned on the opening
/// bracket of the JSON array literal
static VIDEO_DATA: Lazy<Regex> = Lazy::new(|| Regex::new(r"video_data\s*:\s*\[").unwrap());

pub struct FacebookRE {}

impl NewExtractor for FacebookRE {
    fn new() -> Self {
        FacebookRE {}
    }
}

impl URLMatcher for FacebookRE {
    fn match_extractor(&self, url: &Url) -> bool {
        Some(url)
            .filter(|u| match u.scheme() {
                "http" | "https" => true,
                _ => false,
            })
            .filter(|u| _is_fb_watch(u) || (_is_facebook(u) && _has_video_path(u)))
            .is_some()
    }
}

// must be a separate non-async function for nipper reasons
fn inline_scripts(webpage: &str) -> Vec<String> {
    Document::from(webpage)
        .select("script")
        .iter()
        .map(|s| s.text().to_string())
        .collect()
}

/// First element of the first parseable `video_data` array in the page's
/// inline scripts.
pub fn scrape_video_data(webpage: &str) -> Result<VideoData> {
    for script in inline_scripts(webpage) {
        let anchor = match VIDEO_DATA.find(&script) {
            Some(m) => m,
            None => continue,
        };
        // arbitrary script text follows the literal; take the first
        // complete JSON value starting at the bracket
        let literal = &script[anchor.end() - 1..];
        match serde_json::Deserializer::from_str(literal)
            .into_iter::<Vec<VideoData>>()
            .next()
        {
            Some(Ok(datas)) if !datas.is_empty() => {
                return Ok(datas.into_iter().next().unwrap())
            }
            Some(Ok(_)) => debug!("video_data array is empty"),
            Some(Err(e)) => debug!("video_data literal did not parse: {}", e),
            None => {}
        }
    }
    Err(ExtractionError::NotFound.into())
}

/// Quality entries resolved to formats, labelled `"<height>p"`.
/// Entries missing either field are skipped, the page does not owe us a
/// complete schema. Labels are unique, first occurrence wins.
pub fn formats_from(data: VideoData) -> Result<Vec<MediaFormat>> {
    let qualities = data.video_qualities.ok_or(ExtractionError::NoQualities)?;
    let mut formats: Vec<MediaFormat> = vec![];
    for quality in qualities {
        let (height, url) = match (quality.height, quality.url) {
            (Some(height), Some(url)) => (height, url),
            (height, url) => {
                warn!(
                    ?height,
                    url_present = url.is_some(),
                    "skipping quality entry with missing fields"
                );
                continue;
            }
        };
        let url = match Url::parse(&url) {
            Ok(url) => url,
            Err(e) => {
                warn!("skipping {}p entry with unparseable url: {}", height, e);
                continue;
            }
        };
        let id = format!("{}p", height);
        if formats.iter().any(|f| f.id == id) {
            continue;
        }
        formats.push(MediaFormat {
            id,
            breed: FormatBreed::AudioVideo,
            url,
            video_details: Some(VideoDetails {
                width: quality.width,
                height: Some(height),
            }),
        });
    }
    Ok(formats)
}

#[async_trait]
impl RecordingExtractor for FacebookRE {
    async fn extract_recording(
        &self,
        ctx: &ExtractionContext,
        url: &Url,
        _wanted: &Extractable,
    ) -> Result<Extraction> {
        debug!("fetching {}", url);
        let webpage = ctx
            .http
            .get(url.clone())
            .header(header::USER_AGENT, MOBILE_USER_AGENT)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let data = scrape_video_data(&webpage)?;
        let formats = formats_from(data)?;
        Ok(Extraction {
            metadata: Some(MediaMetadata {
                id: extract_video_id(url).unwrap_or_else(|| "video".to_string()),
                ..Default::default()
            }),
            playback: Some(MediaPlayback { formats }),
        })
    }
}

#[cfg(test)]
mod tests {
    use fbdown_extractor_api::url::Url;
    use fbdown_extractor_api::{ExtractionError, URLMatcher};

    use super::{formats_from, scrape_video_data, FacebookRE};

    static PAGE_TWO_QUALITIES: &str = concat!(
        r#"<html><head><title>v</title><script>var _w=1;</script>"#,
        r#"<script>require("player",{video_data:[{"video_qualities":"#,
        r#"[{"height":360,"width":640,"url":"https://video.xx.fbcdn.net/v/sd.mp4?x=1"},"#,
        r#"{"height":720,"width":1280,"url":"https://video.xx.fbcdn.net/v/hd.mp4?x=2"}]}"#,
        r#"],dash:false});</script></head><body></body></html>"#,
    );

    #[test]
    fn match_video_urls() {
        let facebook = FacebookRE {};
        for url in [
            "https://www.facebook.com/somepage/videos/10153231379946729/",
            "https://facebook.com/watch/?v=10153231379946729",
            "https://fb.watch/4a1b2c3d4e/",
            "https://m.facebook.com/groups/1234/videos/5678/",
        ] {
            assert!(facebook.match_extractor(&Url::parse(url).unwrap()), "{}", url);
        }
    }

    #[test]
    fn reject_other_urls() {
        let facebook = FacebookRE {};
        for url in [
            "https://www.facebook.com/some.profile/about",
            "https://example.com/user/videos/123",
            "ftp://facebook.com/user/videos/123",
        ] {
            assert!(
                !facebook.match_extractor(&Url::parse(url).unwrap()),
                "{}",
                url
            );
        }
    }

    #[test]
    fn scrape_two_qualities_in_order() {
        let data = scrape_video_data(PAGE_TWO_QUALITIES).expect("video_data");
        let formats = formats_from(data).expect("formats");
        assert_eq!(formats.len(), 2);
        assert_eq!(formats[0].id, "360p");
        assert_eq!(formats[0].url.as_str(), "https://video.xx.fbcdn.net/v/sd.mp4?x=1");
        assert_eq!(formats[0].video_details.as_ref().unwrap().height, Some(360));
        assert_eq!(formats[1].id, "720p");
        assert_eq!(formats[1].url.as_str(), "https://video.xx.fbcdn.net/v/hd.mp4?x=2");
    }

    #[test]
    fn page_without_marker_is_not_found() {
        let err = scrape_video_data("<html><script>var a = 1;</script></html>")
            .expect_err("no marker");
        assert_eq!(
            err.downcast_ref::<ExtractionError>(),
            Some(&ExtractionError::NotFound)
        );
    }

    #[test]
    fn marker_without_parseable_array_is_not_found() {
        let err = scrape_video_data(
            r#"<html><script>video_data:[{"height":360,</script></html>"#,
        )
        .expect_err("truncated literal");
        assert_eq!(
            err.downcast_ref::<ExtractionError>(),
            Some(&ExtractionError::NotFound)
        );
    }

    #[test]
    fn metadata_without_qualities_is_no_qualities() {
        let data = scrape_video_data(
            r#"<html><script>video_data:[{"other":"stuff"}]</script></html>"#,
        )
        .expect("video_data");
        let err = formats_from(data).expect_err("no qualities");
        assert_eq!(
            err.downcast_ref::<ExtractionError>(),
            Some(&ExtractionError::NoQualities)
        );
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let data = scrape_video_data(concat!(
            r#"<html><script>video_data:[{"video_qualities":["#,
            r#"{"height":1080},"#,
            r#"{"url":"https://video.xx.fbcdn.net/v/no-height.mp4"},"#,
            r#"{"height":480,"url":"https://video.xx.fbcdn.net/v/480.mp4"}"#,
            r#"]}]</script></html>"#,
        ))
        .expect("video_data");
        let formats = formats_from(data).expect("formats");
        assert_eq!(formats.len(), 1);
        assert_eq!(formats[0].id, "480p");
    }

    #[test]
    fn duplicate_labels_keep_first() {
        let data = scrape_video_data(concat!(
            r#"<html><script>video_data:[{"video_qualities":["#,
            r#"{"height":720,"url":"https://video.xx.fbcdn.net/v/a.mp4"},"#,
            r#"{"height":720,"url":"https://video.xx.fbcdn.net/v/b.mp4"}"#,
            r#"]}]</script></html>"#,
        ))
        .expect("video_data");
        let formats = formats_from(data).expect("formats");
        assert_eq!(formats.len(), 1);
        assert_eq!(formats[0].url.as_str(), "https://video.xx.fbcdn.net/v/a.mp4");
    }
}
