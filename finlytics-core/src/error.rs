use thiserror::Error;

/// Failure of one upload round-trip to the parsing service
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UploadError {
    /// Connection refused, DNS failure, timeout, broken body stream
    #[error("could not connect to backend: {0}")]
    Transport(String),
    /// Service answered with a non-2xx status
    #[error("upload failed: {status}")]
    Rejected { status: u16 },
    /// Service answered 2xx but the body is not a parse result
    #[error("unreadable parse result: {0}")]
    Decode(String),
}

impl UploadError {
    /// Short notice suitable for showing to the user
    pub fn notice(&self) -> &'static str {
        match self {
            UploadError::Transport(_) | UploadError::Decode(_) => "Could not connect to backend",
            UploadError::Rejected { .. } => "Upload failed",
        }
    }
}

/// Caller misuse of the session state machine
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no file selected")]
    NoFileSelected,
    #[error("an upload is already in flight")]
    UploadInFlight,
    #[error("statement already parsed; select a file again to re-upload")]
    AlreadyParsed,
}

/// Rejected file selection
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("too many files selected: {count} (max {max})")]
    TooManyFiles { count: usize, max: usize },
    #[error("{name} is {size} bytes (max {max})")]
    FileTooLarge { name: String, size: u64, max: u64 },
    #[error("{name}: unsupported file type (CSV, PDF or image expected)")]
    UnsupportedType { name: String },
}

/// Onboarding profile that cannot be submitted yet
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum OnboardError {
    #[error("full name must be at least 2 characters")]
    NameTooShort,
    #[error("please select a role")]
    MissingRole,
    #[error("please enter a valid email address")]
    InvalidEmail,
}
