/// Convenience result type used across dia.
pub type DiaResult<T> = Result<T, DiaError>;

/// Top-level error taxonomy used by the index, resolver and compositor.
///
/// Every variant is terminal for the render attempt that raised it. Variants carry the
/// identifier or file name involved so callers can report a precise message.
#[derive(thiserror::Error, Debug)]
pub enum DiaError {
    /// Malformed manifest structure.
    #[error("parse error: {0}")]
    Parse(String),

    /// The parent chain starting at a requested identifier loops back on itself.
    #[error("circular dependency detected involving id '{id}'")]
    Cycle {
        /// Identifier seen twice while walking the chain.
        id: String,
    },

    /// An identifier in the chain has no `image_map` entry.
    #[error("no image filename mapped for id '{id}'")]
    MissingImageMapping {
        /// Identifier without a filename.
        id: String,
    },

    /// The asset store has no entry with this name.
    #[error("asset not found: '{name}'")]
    AssetNotFound {
        /// Entry name as stored in the manifest.
        name: String,
    },

    /// The asset store found the entry but could not read it.
    #[error("failed to read asset '{name}': {source:#}")]
    AssetRead {
        /// Entry name as stored in the manifest.
        name: String,
        /// Underlying IO or archive failure.
        source: anyhow::Error,
    },

    /// The image codec rejected an asset's bytes.
    #[error("failed to decode '{name}': {source:#}")]
    Decode {
        /// Entry name the bytes were read from.
        name: String,
        /// Underlying codec failure.
        source: anyhow::Error,
    },

    /// Alpha map dimensions differ from the canvas.
    #[error("alpha map size mismatch (expected {expected:?}, got {actual:?})")]
    AlphaSizeMismatch {
        /// Canvas dimensions `(width, height)`.
        expected: (u32, u32),
        /// Alpha map dimensions `(width, height)`.
        actual: (u32, u32),
    },

    /// An alpha policy was applied to a canvas without an alpha channel.
    #[error("target buffer has no alpha channel ({channels} channels)")]
    MissingAlphaChannel {
        /// Channel count of the offending buffer.
        channels: u8,
    },

    /// Pixel buffer geometry is inconsistent with its backing bytes.
    #[error("invalid pixel buffer: {0}")]
    InvalidBuffer(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DiaError {
    /// Build a [`DiaError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`DiaError::InvalidBuffer`] value.
    pub fn invalid_buffer(msg: impl Into<String>) -> Self {
        Self::InvalidBuffer(msg.into())
    }

    /// Build a [`DiaError::AssetNotFound`] value.
    pub fn asset_not_found(name: impl Into<String>) -> Self {
        Self::AssetNotFound { name: name.into() }
    }

    /// Build a [`DiaError::AssetRead`] value.
    pub fn asset_read(name: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self::AssetRead {
            name: name.into(),
            source: source.into(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
