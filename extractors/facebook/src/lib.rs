#[macro_use]
extern crate smart_default;

mod common;
pub mod types;
pub mod video;

use fbdown_extractor_api::{NewExtractor, RecordingExtractor};
use once_cell::sync::Lazy;

pub use common::{extract_video_id, output_filename};
pub use video::FacebookRE;

pub static EXTRACTORS: Lazy<Vec<Box<dyn RecordingExtractor>>> =
    Lazy::new(|| vec![Box::new(FacebookRE::new())]);
