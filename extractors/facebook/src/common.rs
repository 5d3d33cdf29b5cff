use fbdown_extractor_api::url::Url;
use once_cell::sync::Lazy;
use regex::Regex;

pub static FACEBOOK_HOSTS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "facebook.com",
        "www.facebook.com",
        "m.facebook.com",
        "web.facebook.com",
    ]
});

pub static FACEBOOK_HOSTS_SHORT: Lazy<Vec<&'static str>> = Lazy::new(|| vec!["fb.watch"]);

static VIDEO_ID_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"facebook\.com/.*?/videos/(\d+)").unwrap(),
        Regex::new(r"fb\.watch/(\d+)").unwrap(),
        Regex::new(r"facebook\.com/watch/\?v=(\d+)").unwrap(),
    ]
});

/// Numeric video ID carried by the known URL shapes.
/// Only used for naming output files, nothing is fetched by it.
pub fn extract_video_id(url: &Url) -> Option<String> {
    VIDEO_ID_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(url.as_str()))
        .map(|captures| captures[1].to_string())
}

/// `facebook_<id>_<label>.mp4`, with a generic stem when the URL carries
/// no recognizable ID.
pub fn output_filename(url: &Url, quality_label: &str) -> String {
    format!(
        "facebook_{}_{}.mp4",
        extract_video_id(url).unwrap_or_else(|| "video".to_string()),
        quality_label,
    )
}

pub(crate) fn _is_facebook(u: &&Url) -> bool {
    u.host_str()
        .map(|h| FACEBOOK_HOSTS.contains(&h))
        .unwrap_or(false)
}

pub(crate) fn _is_fb_watch(u: &&Url) -> bool {
    u.host_str()
        .map(|h| FACEBOOK_HOSTS_SHORT.contains(&h))
        .unwrap_or(false)
}

// `/<page>/videos/<id>` and `/watch/?v=<id>` both count
pub(crate) fn _has_video_path(u: &&Url) -> bool {
    match u.path_segments() {
        Some(segments) => {
            let segments: Vec<_> = segments.collect();
            segments.contains(&"videos") || segments.first() == Some(&"watch")
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use fbdown_extractor_api::url::Url;

    use super::{extract_video_id, output_filename};

    #[test]
    fn video_id_from_page_videos_path() {
        let id = extract_video_id(&Url::parse("https://facebook.com/user/videos/123456").unwrap());
        assert_eq!(id.as_deref(), Some("123456"));
    }

    #[test]
    fn video_id_from_short_link() {
        let id = extract_video_id(&Url::parse("https://fb.watch/987654").unwrap());
        assert_eq!(id.as_deref(), Some("987654"));
    }

    #[test]
    fn video_id_from_watch_query() {
        let id =
            extract_video_id(&Url::parse("https://facebook.com/watch/?v=111222333").unwrap());
        assert_eq!(id.as_deref(), Some("111222333"));
    }

    #[test]
    fn video_id_absent_for_other_urls() {
        let id = extract_video_id(&Url::parse("https://facebook.com/some.profile").unwrap());
        assert_eq!(id, None);
    }

    #[test]
    fn filename_carries_id_and_label() {
        let name = output_filename(
            &Url::parse("https://www.facebook.com/group/videos/424242").unwrap(),
            "720p",
        );
        assert_eq!(name, "facebook_424242_720p.mp4");
    }

    #[test]
    fn filename_falls_back_without_id() {
        let name = output_filename(&Url::parse("https://example.com/whatever").unwrap(), "360p");
        assert_eq!(name, "facebook_video_360p.mp4");
    }
}
