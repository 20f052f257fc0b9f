//! HTTP collaborators: the meeting-platform client, the calendar-plugin
//! client, and the CSV ledger of created meetings.

pub mod error;
pub mod ledger;
pub mod wordpress;
pub mod zoom;

pub use error::{ApiError, ApiErrorCode, ApiResult};
pub use ledger::{LedgerRow, MeetingLedger};
pub use wordpress::{CreatedEvent, WordPressClient};
pub use zoom::{CreatedMeeting, MeetingOccurrence, ZoomClient, ZoomCredentials, ZoomUser};
