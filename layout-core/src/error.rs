use std::path::PathBuf;

/// Failures at the edges of the layout engine: reading inputs, parsing them
/// and encoding exported blueprints. Layout computation itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum AtlasError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid layout config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid layout config: {0}")]
    InvalidConfig(String),

    #[error("SVG parse error: {0}")]
    Svg(#[from] usvg::Error),

    #[error("pixmap alloc failed for {0}x{1}")]
    Pixmap(u32, u32),

    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),
}

pub type Result<T, E = AtlasError> = std::result::Result<T, E>;

pub(crate) fn read_file(path: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| AtlasError::Io {
        path: path.to_path_buf(),
        source,
    })
}
