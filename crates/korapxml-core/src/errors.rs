use std::path::Path;
use thiserror::Error;

/// Result type alias using KorapError
pub type Result<T> = std::result::Result<T, KorapError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of all errors
/// raised while building or exporting a document graph. Each kind maps to a
/// stable error code that can be used for programmatic error handling,
/// testing, and log assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidInput,
    InvalidCorpusPath,
    InvalidRange,
    NotFound,
    AlreadyExists,

    // Traversal/Export
    AmbiguousSpan,
    SpanOutsideText,
    CycleDetected,

    // Configuration
    UnknownFoundry,
    InvalidConfiguration,

    // Integration/IO
    DirectoryCreation,
    Io,
    Xml,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidCorpusPath => "ERR_INVALID_CORPUS_PATH",
            ExErrorKind::InvalidRange => "ERR_INVALID_RANGE",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ExErrorKind::AmbiguousSpan => "ERR_AMBIGUOUS_SPAN",
            ExErrorKind::SpanOutsideText => "ERR_SPAN_OUTSIDE_TEXT",
            ExErrorKind::CycleDetected => "ERR_CYCLE_DETECTED",
            ExErrorKind::UnknownFoundry => "ERR_UNKNOWN_FOUNDRY",
            ExErrorKind::InvalidConfiguration => "ERR_INVALID_CONFIGURATION",
            ExErrorKind::DirectoryCreation => "ERR_DIRECTORY_CREATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Xml => "ERR_XML",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// This error type provides a structured representation of errors with
/// classification fields for programmatic handling and rich context for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    node_id: Option<String>,
    path: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            node_id: None,
            path: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add node ID context
    pub fn with_node_id(mut self, id: impl Into<String>) -> Self {
        self.node_id = Some(id.into());
        self
    }

    /// Add filesystem or corpus path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the node ID context, if any
    pub fn node_id(&self) -> Option<&str> {
        self.node_id.as_deref()
    }

    /// Get the path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(node_id) = &self.node_id {
            write!(f, " (node_id: {})", node_id)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for document graph construction and KorAP-XML export
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KorapError {
    // ===== Identifier Errors =====
    /// Corpus path too short to derive a document ID (needs corpus root and document)
    #[error("Can't generate a valid document ID: corpus path '{path}' has {segments} segment(s), at least 2 required")]
    InvalidCorpusPath { path: String, segments: usize },

    // ===== Range Resolution Errors =====
    /// Node does not resolve to exactly one data source sequence
    #[error("Invalid size {sequences} of data source sequences for node {node_id}")]
    AmbiguousSpan { node_id: String, sequences: usize },

    /// Node resolves to a single sequence, but in a different text
    #[error("Node {node_id} covers text '{covered}', not the exported text '{text}'")]
    SpanOutsideText {
        node_id: String,
        text: String,
        covered: String,
    },

    /// Traversal from a node reached one of its own ancestors
    #[error("Cycle detected while resolving node {node_id} (back edge to {via})")]
    CycleDetected { node_id: String, via: String },

    // ===== Graph Construction Errors =====
    /// Node name lookup failed
    #[error("Node not found: {node_id}")]
    NodeNotFound { node_id: String },

    /// Text name lookup failed
    #[error("Text not found: {text}")]
    TextNotFound { text: String },

    /// Two nodes share a name within one document graph
    #[error("Duplicate node name in document graph: {node_id}")]
    DuplicateNodeName { node_id: String },

    /// Two texts share a name within one document graph
    #[error("Duplicate text name in document graph: {text}")]
    DuplicateTextName { text: String },

    /// A token may anchor into exactly one text range
    #[error("Token {node_id} is already anchored to a text")]
    TokenAlreadyAnchored { node_id: String },

    /// Only tokens may anchor into a text
    #[error("Node {node_id} is not a token and cannot anchor into a text")]
    NotAToken { node_id: String },

    /// Token range is empty, reversed, or exceeds the text length
    #[error("Invalid range [{start}, {end}) for node {node_id} in text of length {len}")]
    InvalidRange {
        node_id: String,
        start: usize,
        end: usize,
        len: usize,
    },

    // ===== Configuration Errors =====
    /// Configured foundry name is not registered
    #[error("Can't find the foundry with name {name}")]
    UnknownFoundry { name: String },

    /// Foundry mapping entry is not of the form `layer->Foundry`
    #[error("Invalid foundry mapping entry: '{entry}'")]
    InvalidFoundryMapping { entry: String },

    // ===== Output Errors =====
    /// Output directory could not be created
    #[error("Can't create directory {path}: {message}")]
    DirectoryCreation { path: String, message: String },

    /// Two texts of one document sanitize to the same text directory
    #[error("Texts '{first}' and '{second}' would both be exported to {dir}")]
    TextDirectoryCollision {
        first: String,
        second: String,
        dir: String,
    },

    /// Output file could not be opened, written or committed
    #[error("Could not write file {path}: {message}")]
    FileWrite { path: String, message: String },

    /// XML serialization failed
    #[error("XML error: {message}")]
    Xml { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Internal error (should never happen in correct usage)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl KorapError {
    /// Whether this error aborts the export of the whole document
    ///
    /// Document ID derivation, text directory assignment and directory
    /// creation are fatal. Every other failure is local to a node, a file,
    /// or a configuration entry.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            KorapError::InvalidCorpusPath { .. }
                | KorapError::DirectoryCreation { .. }
                | KorapError::TextDirectoryCollision { .. }
        )
    }

    /// Whether this error only affects a single exported node
    pub fn is_node_local(&self) -> bool {
        matches!(
            self,
            KorapError::AmbiguousSpan { .. }
                | KorapError::SpanOutsideText { .. }
                | KorapError::CycleDetected { .. }
        )
    }
}

/// Create a directory creation error
pub fn directory_error(path: &Path, err: std::io::Error) -> KorapError {
    KorapError::DirectoryCreation {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

/// Create a file write error
pub fn file_error(path: &Path, err: impl std::fmt::Display) -> KorapError {
    KorapError::FileWrite {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

impl From<quick_xml::Error> for KorapError {
    fn from(err: quick_xml::Error) -> Self {
        KorapError::Xml {
            message: err.to_string(),
        }
    }
}

impl From<KorapError> for ExError {
    fn from(err: KorapError) -> Self {
        match err {
            KorapError::InvalidCorpusPath { path, segments } => {
                ExError::new(ExErrorKind::InvalidCorpusPath)
                    .with_op("document_id")
                    .with_path(path)
                    .with_message(format!("{} segment(s), at least 2 required", segments))
            }

            // Range resolution
            KorapError::AmbiguousSpan { node_id, sequences } => {
                ExError::new(ExErrorKind::AmbiguousSpan)
                    .with_op("resolve_range")
                    .with_node_id(node_id)
                    .with_message(format!("{} data source sequences", sequences))
            }
            KorapError::SpanOutsideText {
                node_id,
                text,
                covered,
            } => ExError::new(ExErrorKind::SpanOutsideText)
                .with_op("resolve_range")
                .with_node_id(node_id)
                .with_message(format!("covers '{}', exported '{}'", covered, text)),
            KorapError::CycleDetected { node_id, via } => ExError::new(ExErrorKind::CycleDetected)
                .with_op("resolve_range")
                .with_node_id(node_id)
                .with_message(format!("back edge to {}", via)),

            // Graph construction
            KorapError::NodeNotFound { node_id } => ExError::new(ExErrorKind::NotFound)
                .with_node_id(node_id)
                .with_message("Node not found"),
            KorapError::TextNotFound { text } => ExError::new(ExErrorKind::NotFound)
                .with_message(format!("Text not found: {}", text)),
            KorapError::DuplicateNodeName { node_id } => ExError::new(ExErrorKind::AlreadyExists)
                .with_node_id(node_id)
                .with_message("Duplicate node name"),
            KorapError::DuplicateTextName { text } => ExError::new(ExErrorKind::AlreadyExists)
                .with_message(format!("Duplicate text name: {}", text)),
            KorapError::TokenAlreadyAnchored { node_id } => {
                ExError::new(ExErrorKind::AlreadyExists)
                    .with_op("anchor_token")
                    .with_node_id(node_id)
                    .with_message("Token is already anchored")
            }
            KorapError::NotAToken { node_id } => ExError::new(ExErrorKind::InvalidInput)
                .with_op("anchor_token")
                .with_node_id(node_id)
                .with_message("Only tokens anchor into texts"),
            KorapError::InvalidRange {
                node_id,
                start,
                end,
                len,
            } => ExError::new(ExErrorKind::InvalidRange)
                .with_op("anchor_token")
                .with_node_id(node_id)
                .with_message(format!("[{}, {}) in text of length {}", start, end, len)),

            // Configuration
            KorapError::UnknownFoundry { name } => ExError::new(ExErrorKind::UnknownFoundry)
                .with_op("resolve_foundry")
                .with_message(format!("Unknown foundry: {}", name)),
            KorapError::InvalidFoundryMapping { entry } => {
                ExError::new(ExErrorKind::InvalidConfiguration)
                    .with_op("parse_foundry_mapping")
                    .with_message(format!("Invalid entry: {}", entry))
            }

            // Output
            KorapError::DirectoryCreation { path, message } => {
                ExError::new(ExErrorKind::DirectoryCreation)
                    .with_op("create_dir")
                    .with_path(path)
                    .with_message(message)
            }
            KorapError::TextDirectoryCollision { first, second, dir } => {
                ExError::new(ExErrorKind::AlreadyExists)
                    .with_op("export_document")
                    .with_path(dir)
                    .with_message(format!("texts '{}' and '{}' share a directory", first, second))
            }
            KorapError::FileWrite { path, message } => ExError::new(ExErrorKind::Io)
                .with_op("write_file")
                .with_path(path)
                .with_message(message),
            KorapError::Xml { message } => ExError::new(ExErrorKind::Xml).with_message(message),
            KorapError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
            KorapError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}
