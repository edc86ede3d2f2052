use thiserror::Error;

/// Reasons the query response did not yield an image URL. These end the run
/// without a download but are not fatal.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractError {
    #[error("list index out of range: the response contained no records")]
    IndexOutOfRange,
    #[error("key 0 not found: the response is not a list of records")]
    NotAList,
    #[error("key 'value' not found in the first record")]
    MissingValue,
    #[error("key 'value' in the first record does not hold a URL string")]
    NotAString,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid endpoint URL '{url}': {source}")]
    Endpoint {
        url: String,
        source: url::ParseError,
    },
    #[error("Unable to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}
