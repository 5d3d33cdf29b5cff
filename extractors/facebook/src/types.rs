pub mod web_fragments {
    use serde::Deserialize;

    /// Element of the `video_data` array embedded in the mobile page's
    /// inline script. The markup guarantees nothing, so every field
    /// stays optional.
    #[derive(SmartDefault, Deserialize, PartialEq, Debug)]
    pub struct VideoData {
        #[serde(default)]
        pub video_qualities: Option<Vec<parts::VideoQuality>>,
    }

    pub mod parts {
        use serde::Deserialize;

        /// One downloadable rendition.
        #[derive(SmartDefault, Deserialize, PartialEq, Debug)]
        pub struct VideoQuality {
            pub height: Option<u32>,
            pub width: Option<u32>,
            /// direct HTTPS url to the media file
            pub url: Option<String>,
        }
    }
}
