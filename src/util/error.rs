// LinkSphere - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// All errors preserve the causal chain for diagnostic logging.
//
// The application scanner has no error type: missing or unreadable
// directories degrade to fewer results instead of failing the scan.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all LinkSphere operations.
#[derive(Debug)]
pub enum LinkSphereError {
    /// A library edit was rejected.
    Library(LibraryError),

    /// Persisting or restoring the library failed.
    Store(StoreError),

    /// Configuration loading or validation failed.
    Config(ConfigError),
}

impl fmt::Display for LinkSphereError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Library(e) => write!(f, "Library error: {e}"),
            Self::Store(e) => write!(f, "Storage error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
        }
    }
}

impl std::error::Error for LinkSphereError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Library(e) => Some(e),
            Self::Store(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Library errors
// ---------------------------------------------------------------------------

/// Reasons a shortcut or note cannot be added to the library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryError {
    /// The shortcut target path was empty or whitespace.
    EmptyPath,

    /// A shortcut with the same target already exists.
    DuplicateTarget { target: PathBuf },

    /// The note title was empty or whitespace.
    EmptyTitle,

    /// The note title exceeds the maximum length.
    TitleTooLong { length: usize, max: usize },
}

impl fmt::Display for LibraryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPath => write!(f, "No folder or application was selected"),
            Self::DuplicateTarget { target } => {
                write!(f, "'{}' is already in the library", target.display())
            }
            Self::EmptyTitle => write!(f, "A note needs a title"),
            Self::TitleTooLong { length, max } => {
                write!(f, "Note title is {length} characters, maximum is {max}")
            }
        }
    }
}

impl std::error::Error for LibraryError {}

impl From<LibraryError> for LinkSphereError {
    fn from(e: LibraryError) -> Self {
        Self::Library(e)
    }
}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

/// Errors raised while saving the library to disk.
///
/// Loading never returns these: an unreadable library is logged and the
/// application starts with an empty one.
#[derive(Debug)]
pub enum StoreError {
    /// Parent directory could not be created.
    CreateDir { path: PathBuf, source: io::Error },

    /// Serialising the library to JSON failed.
    Serialise { source: serde_json::Error },

    /// Writing the temp file or renaming it into place failed.
    Write { path: PathBuf, source: io::Error },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateDir { path, source } => write!(
                f,
                "cannot create data directory '{}': {source}",
                path.display()
            ),
            Self::Serialise { source } => write!(f, "failed to serialise library: {source}"),
            Self::Write { path, source } => {
                write!(f, "failed to write '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CreateDir { source, .. } => Some(source),
            Self::Serialise { source } => Some(source),
            Self::Write { source, .. } => Some(source),
        }
    }
}

impl From<StoreError> for LinkSphereError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
///
/// `load_config` converts these into user-facing warnings and falls back to
/// defaults, so the application always starts.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: &'static str,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for LinkSphereError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for LinkSphere results.
pub type Result<T> = std::result::Result<T, LinkSphereError>;
