use thiserror::Error;

/// The page answered, but did not carry what we were looking for.
/// Transport failures are not part of this taxonomy; they surface as
/// `reqwest` errors from the fetch itself.
#[derive(Error, PartialEq, Eq, Clone, Debug)]
pub enum ExtractionError {
    /// no inline script carried the metadata marker, or the marker was
    /// not followed by a JSON array literal we could parse
    #[error("no video metadata found in the page")]
    NotFound,
    /// metadata parsed fine but listed no playable qualities
    #[error("no video qualities listed in the metadata")]
    NoQualities,
}
