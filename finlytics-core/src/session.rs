//! Upload/result session.
//!
//! ```text
//!   Idle --select--> FileSelected --begin_upload--> Uploading --ok--> Parsed
//!                        ^   ^                          |
//!                        |   +--------select------------+--err--> Failed --begin_upload--> Uploading
//!                        +--------------select------------------------------------------------+
//! ```
//!
//! Every upload gets a ticket from a per-session counter. A completion is
//! applied only if its ticket is the one currently uploading, so a late
//! response for a superseded file never overwrites newer state.

use log::{debug, info};

use crate::error::{SessionError, UploadError};
use crate::filter::{FilterCriteria, filter_transactions};
use crate::transaction::{ParsedResult, Transaction};
use crate::upload::SelectedFile;

/// Correlates an upload request with its completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UploadTicket(u64);

impl UploadTicket {
    pub fn seq(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    #[default]
    Idle,
    FileSelected,
    Uploading(UploadTicket),
    Parsed(ParsedResult),
    Failed(UploadError),
}

/// What the caller must send to the parsing service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub ticket: UploadTicket,
    pub file: SelectedFile,
}

/// Outcome of [`Session::complete_upload`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Installed { count: usize },
    Failed(UploadError),
    /// Response for a superseded upload; session left untouched
    Stale,
}

#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
    files: Vec<SelectedFile>,
    criteria: FilterCriteria,
    seq: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self.state, SessionState::Uploading(_))
    }

    /// Replace the selection. Any parsed result is dropped right away and
    /// an in-flight upload becomes stale.
    pub fn select_files(&mut self, files: Vec<SelectedFile>) {
        if let SessionState::Uploading(ticket) = self.state {
            debug!("selection supersedes in-flight upload #{}", ticket.seq());
        }
        self.files = files;
        self.state = if self.files.is_empty() {
            SessionState::Idle
        } else {
            SessionState::FileSelected
        };
    }

    /// Start uploading the first selected file.
    pub fn begin_upload(&mut self) -> Result<UploadRequest, SessionError> {
        match self.state {
            SessionState::Uploading(_) => return Err(SessionError::UploadInFlight),
            SessionState::Parsed(_) => return Err(SessionError::AlreadyParsed),
            SessionState::Idle => return Err(SessionError::NoFileSelected),
            SessionState::FileSelected | SessionState::Failed(_) => {}
        }
        let file = self
            .files
            .first()
            .cloned()
            .ok_or(SessionError::NoFileSelected)?;

        self.seq += 1;
        let ticket = UploadTicket(self.seq);
        self.state = SessionState::Uploading(ticket);
        info!("upload #{} started for {}", ticket.seq(), file.name);
        Ok(UploadRequest { ticket, file })
    }

    /// Apply the service's answer for `ticket`.
    pub fn complete_upload(
        &mut self,
        ticket: UploadTicket,
        outcome: Result<ParsedResult, UploadError>,
    ) -> Completion {
        if self.state != SessionState::Uploading(ticket) {
            debug!("dropping stale response for upload #{}", ticket.seq());
            return Completion::Stale;
        }
        match outcome {
            Ok(parsed) => {
                let count = parsed.count;
                info!("upload #{} parsed {count} transactions", ticket.seq());
                self.criteria = FilterCriteria::default();
                self.state = SessionState::Parsed(parsed);
                Completion::Installed { count }
            }
            Err(err) => {
                info!("upload #{} failed: {err}", ticket.seq());
                self.state = SessionState::Failed(err.clone());
                Completion::Failed(err)
            }
        }
    }

    pub fn parsed(&self) -> Option<&ParsedResult> {
        match &self.state {
            SessionState::Parsed(p) => Some(p),
            _ => None,
        }
    }

    /// Unfiltered transactions, empty unless parsed
    pub fn raw(&self) -> &[Transaction] {
        self.parsed().map(|p| p.raw.as_slice()).unwrap_or(&[])
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
    }

    /// Recomputed from the current result and criteria on every call.
    pub fn filtered(&self) -> Vec<&Transaction> {
        filter_transactions(self.raw(), &self.criteria)
    }
}
