/// Failure to load the doctor directory. Fatal to the listing: nothing is
/// rendered from a partial load and nothing is retried.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error: {0}")]
    Status(u16),

    #[error("Invalid directory response: {0}")]
    Decode(String),
}
