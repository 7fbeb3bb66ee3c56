//! finlytics-core: transaction model, amount resolution, filtering and the
//! upload/result session for parsed bank statements

pub mod amount;
pub mod dates;
pub mod error;
pub mod filter;
pub mod onboard;
pub mod session;
pub mod transaction;
pub mod upload;

pub use amount::resolve_amount;
pub use dates::parse_calendar_date;
pub use error::{OnboardError, SelectionError, SessionError, UploadError};
pub use filter::{CategoryFilter, CompiledFilter, FilterCriteria, filter_transactions};
pub use onboard::{Profile, ProfileDraft, Role, Step, Wizard};
pub use session::{Completion, Session, SessionState, UploadRequest, UploadTicket};
pub use transaction::{Category, ParsedResult, Transaction};
pub use upload::{SelectedFile, StatementKind, validate_selection};
