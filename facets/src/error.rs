use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Browse filter provider error: {0}")]
    BrowseFilters(#[source] anyhow::Error),

    #[error("Property provider error: {0}")]
    Properties(#[source] anyhow::Error),

    #[error("Dictionary item search error: {0}")]
    DictionaryItems(#[source] anyhow::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
