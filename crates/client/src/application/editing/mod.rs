//! Preference editing core: ledger, stored cache, grid projection, commit
//! controller and the session that ties them together.

mod commit;
mod grid;
mod ledger;
mod notification;
mod session;
mod stored_index;

pub use commit::{
    CommitBatch, CommitController, CommitError, CommitFailure, CommitPhase, CommitReport,
    CommitStrategy, CommitSuccess, EntryResult,
};
pub use grid::{render_grid, resolve_active, GridCell, GridRow, PreferenceGrid};
pub use ledger::{ChangeOperation, PendingChange, PendingChangeLedger, RecordOutcome};
pub use notification::{Notification, NotificationLevel, NotificationQueue};
pub use session::{Brush, ClickOutcome, EditingSession, IgnoreReason, LoadState, SessionError};
pub use stored_index::StoredPreferenceIndex;
