//! Recurrence rule payloads for the calendar plugin.
//!
//! The plugin's rule schema has two historical variants that disagree on
//! shape and on how "no end date" is represented:
//!
//! - the **structured** variant nests a `Custom`/`Monthly` block and omits
//!   the end block entirely when the series has no end date;
//! - the **compact** variant uses a flat `every-month` rule and always
//!   carries an `end_type`, emitting `"never"` when there is no end date.
//!
//! Both are built from the same normalized [`RecurrenceRule`]; the variant is
//! an explicit caller choice, never inferred from the data.

use serde::{Deserialize, Serialize};

use seriesbridge_core::{EndCondition, RecurrenceRule};

/// Which rule payload variant to emit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TribeSchemaVersion {
    /// The nested `Custom`/`Monthly` payload.
    #[default]
    Structured,
    /// The flat `every-month` payload.
    Compact,
}

/// A rule payload in either schema variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TribeRulePayload {
    Structured(StructuredRulePayload),
    Compact(CompactRulePayload),
}

impl TribeRulePayload {
    /// Builds the payload for the requested schema variant.
    pub fn build(rule: &RecurrenceRule, version: TribeSchemaVersion) -> Self {
        match version {
            TribeSchemaVersion::Structured => {
                Self::Structured(StructuredRulePayload::from_rule(rule))
            }
            TribeSchemaVersion::Compact => Self::Compact(CompactRulePayload::from_rule(rule)),
        }
    }
}

/// The structured rule payload: `rules` plus a top-level end block that is
/// present only when the series ends on a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredRulePayload {
    /// The rule list (always one monthly custom rule).
    pub rules: Vec<StructuredRule>,
    /// `"On"` when an end date exists; the whole block is omitted otherwise.
    #[serde(rename = "end-type", skip_serializing_if = "Option::is_none")]
    pub end_type: Option<String>,
    /// The end date, `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

impl StructuredRulePayload {
    /// Builds the structured payload from a normalized rule.
    pub fn from_rule(rule: &RecurrenceRule) -> Self {
        let end_date = rule.end.on_date();
        Self {
            rules: vec![StructuredRule {
                kind: "Custom".to_string(),
                custom: CustomRule {
                    kind: "Monthly".to_string(),
                    interval: rule.interval,
                    same_time: yes_no(rule.same_time).to_string(),
                    month: MonthSpec {
                        same_day: "no".to_string(),
                        number: rule.pattern.position.as_number(),
                        day: rule.pattern.weekday.name_upper().to_string(),
                    },
                },
            }],
            end_type: end_date.map(|_| "On".to_string()),
            end: end_date.map(|date| date.format("%Y-%m-%d").to_string()),
        }
    }
}

/// One rule entry in the structured payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredRule {
    /// Always `"Custom"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// The custom rule body.
    pub custom: CustomRule,
}

/// The custom rule body of the structured payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomRule {
    /// Always `"Monthly"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Repeat every N months.
    pub interval: u32,
    /// `"yes"`/`"no"`: occurrences keep the start time of day.
    #[serde(rename = "same-time")]
    pub same_time: String,
    /// The monthly day specification.
    pub month: MonthSpec,
}

/// The month block of the structured payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSpec {
    /// Always `"no"`: the rule targets an ordinal weekday, not a fixed day
    /// of month.
    #[serde(rename = "same-day")]
    pub same_day: String,
    /// Week position: 1-4, -1 for last.
    pub number: i8,
    /// Uppercase weekday name, e.g. `"MONDAY"`.
    pub day: String,
}

/// The compact rule payload: a flat rule list, `end_type` always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompactRulePayload {
    /// The rule list (always one `every-month` rule).
    pub rules: Vec<CompactRule>,
}

impl CompactRulePayload {
    /// Builds the compact payload from a normalized rule.
    pub fn from_rule(rule: &RecurrenceRule) -> Self {
        let end_date = rule.end.on_date();
        Self {
            rules: vec![CompactRule {
                kind: "every-month".to_string(),
                on: rule.pattern.to_string(),
                end_type: if end_date.is_some() { "On" } else { "never" }.to_string(),
                end: end_date.map(|date| date.format("%Y-%m-%d").to_string()),
            }],
        }
    }
}

/// One rule entry in the compact payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompactRule {
    /// Always `"every-month"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Lowercase ordinal-weekday string, e.g. `"first monday"`.
    pub on: String,
    /// `"On"` when an end date exists, `"never"` otherwise.
    pub end_type: String,
    /// The end date, `YYYY-MM-DD`; omitted when the series never ends.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
