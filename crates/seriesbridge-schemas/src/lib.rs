//! External record shapes, recurrence payload builders, and the
//! cross-system mapper.

pub mod error;
pub mod event;
pub mod mapper;
pub mod meeting;
pub mod tribe;
pub mod zoom;

pub use error::{RecordError, RecordResult};
pub use event::{
    DEFAULT_STATUS, DEFAULT_TIMEZONE, EventDefaults, EventPayload, EventRecord, OrganizerField,
    VenueField, compute_end_time, resolve_field,
};
pub use mapper::{DEFAULT_VENUE, MapOptions, MapOutcome, MapReport, map_meeting, map_meetings};
pub use meeting::{DEFAULT_DURATION_MINUTES, MeetingRecord, parse_time};
pub use tribe::{
    CompactRule, CompactRulePayload, CustomRule, MonthSpec, StructuredRule, StructuredRulePayload,
    TribeRulePayload, TribeSchemaVersion,
};
pub use zoom::{RecurrenceFrequency, ZoomMeetingPayload, ZoomMeetingSettings, ZoomRecurrence};
