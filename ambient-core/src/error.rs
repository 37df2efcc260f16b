use thiserror::Error;

/// Failure to turn a response body into a usable [`Reading`].
///
/// [`Reading`]: crate::reading::Reading
#[derive(Debug, Error)]
pub enum ReadingError {
    #[error("invalid JSON body: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("missing numeric field `{0}`")]
    MissingField(&'static str),

    #[error("field `{0}` is not a finite number: {1}")]
    NotFinite(&'static str, f64),
}

/// Failure to render onto a gauge surface. Fails the single update call;
/// the poll loop keeps running.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("gauge `{gauge}` has no usable track (path length {path_length})")]
    Surface { gauge: &'static str, path_length: f64 },
}
