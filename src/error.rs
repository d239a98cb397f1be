use std::fmt;

use thiserror::Error;

/// Errors raised while retrieving remote content
#[derive(Error, Debug)]
pub enum FetchError {
    /// Connection, TLS, timeout or body read failure
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The remote answered with a non-success status
    #[error("Request to {url} failed with status {status}")]
    HttpStatus { url: String, status: u16 },

    /// Error parsing HTTP headers
    #[error("Header parse error: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

impl FetchError {
    /// Status code of the remote response, if the request got that far
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpStatus { status, .. } => Some(*status),
            FetchError::Network(e) => e.status().map(|s| s.as_u16()),
            FetchError::InvalidHeader(_) => None,
        }
    }
}

/// Errors raised while locating the structured-data block in a page
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The page has no `application/ld+json` script
    #[error("No structured-data block found in page")]
    NoStructuredBlock,

    /// The block exists but could not be decoded into a document
    #[error("Malformed structured-data block: {0}")]
    MalformedPayload(String),
}

/// Canonical recipe fields that must be present after normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Name,
    Description,
    Ingredients,
    Instructions,
}

impl RequiredField {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequiredField::Name => "name",
            RequiredField::Description => "description",
            RequiredField::Ingredients => "ingredients",
            RequiredField::Instructions => "instructions",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while mapping a raw record onto the canonical recipe
#[derive(Error, Debug, PartialEq, Eq)]
pub enum NormalizationError {
    #[error("Missing required field: {0}")]
    MissingRequiredField(RequiredField),
}

/// Errors raised while converting a remote image to PNG
#[derive(Error, Debug)]
pub enum ImageError {
    /// Retrieving the source image failed
    #[error("Failed to fetch image: {0}")]
    FetchFailed(#[from] FetchError),

    /// The payload is not an image we can decode
    #[error("Unsupported or corrupt image: {0}")]
    UnsupportedOrCorruptSource(String),

    #[error("Failed to encode PNG: {0}")]
    EncodeFailed(String),

    /// The conversion worker panicked or was cancelled
    #[error("Image conversion aborted: {0}")]
    Aborted(#[from] tokio::task::JoinError),
}

/// Unique indexes maintained by the persistence backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueIndex {
    RecipeId,
    UserName,
}

/// Errors reported by a persistence backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Unique index {0:?} violated")]
    DuplicateKey(UniqueIndex),

    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised by recipe store operations
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("A recipe with id {0} already exists")]
    DuplicateRecipeId(String),

    #[error("User {user_id} already has a recipe named {name:?}")]
    DuplicateNameForUser { user_id: String, name: String },

    #[error("Recipe {0} not found")]
    NotFound(String),

    #[error("Storage backend error: {0}")]
    Backend(#[from] BackendError),
}

/// Errors that can occur during recipe import operations
#[derive(Error, Debug)]
pub enum ImportError {
    /// Failed to fetch recipe page
    #[error("Failed to fetch URL: {0}")]
    FetchError(#[from] FetchError),

    /// Failed to find or decode the structured-data block
    #[error("Failed to extract recipe: {0}")]
    ExtractionError(#[from] ExtractionError),

    /// The structured data lacks a required recipe field
    #[error("Failed to normalize recipe: {0}")]
    NormalizationError(#[from] NormalizationError),

    /// Failed to convert the recipe image
    #[error("Image conversion failed: {0}")]
    ImageError(#[from] ImageError),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
