use bakelint_core::ConfigError;
use bakelint_lang::LanguageError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors surfaced by the orchestrator and the command-line front end.
pub enum BakelintError {
    #[error("config error: {0}")]
    /// The lint config could not be loaded.
    Config(#[from] ConfigError),

    #[error("language profile error: {0}")]
    /// A language profile could not be built.
    Language(#[from] LanguageError),

    #[error("failed to read {path}: {source}")]
    /// A source file could not be read.
    Read {
        /// The file being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    #[error("cannot tell the source kind of {0} (expected .c, .h, .muf, .buildconf or .steelconf)")]
    /// A file's extension maps to no source kind.
    UnknownSourceKind(PathBuf),

    #[error("usage: {0}")]
    /// The command line could not be parsed.
    Usage(String),
}
