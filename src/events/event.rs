use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Server-assigned identity of an event record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EventId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(EventId)
    }
}

impl From<u64> for EventId {
    fn from(value: u64) -> Self {
        EventId(value)
    }
}

// json-server style backends emit ids either as numbers or as numeric strings.
impl<'de> Deserialize<'de> for EventId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Number(n) => Ok(EventId(n)),
            RawId::Text(s) => s
                .parse()
                .map_err(|_| serde::de::Error::custom(format!("invalid event id: {:?}", s))),
        }
    }
}

/// Anything a caller may hold as a row label and use to look up an event.
pub trait AsEventId {
    fn as_event_id(&self) -> Option<EventId>;
}

impl AsEventId for EventId {
    fn as_event_id(&self) -> Option<EventId> {
        Some(*self)
    }
}

impl AsEventId for u64 {
    fn as_event_id(&self) -> Option<EventId> {
        Some(EventId(*self))
    }
}

impl AsEventId for i64 {
    fn as_event_id(&self) -> Option<EventId> {
        u64::try_from(*self).ok().map(EventId)
    }
}

impl AsEventId for str {
    fn as_event_id(&self) -> Option<EventId> {
        self.parse().ok()
    }
}

impl AsEventId for String {
    fn as_event_id(&self) -> Option<EventId> {
        self.as_str().as_event_id()
    }
}

impl<T: AsEventId + ?Sized> AsEventId for &T {
    fn as_event_id(&self) -> Option<EventId> {
        (**self).as_event_id()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub event_name: String,
    pub start_date: String,
    pub end_date: String,
}

impl Event {
    pub fn from_draft(id: EventId, draft: EventDraft) -> Self {
        Self {
            id,
            event_name: draft.event_name,
            start_date: draft.start_date,
            end_date: draft.end_date,
        }
    }

    pub fn to_draft(&self) -> EventDraft {
        EventDraft {
            event_name: self.event_name.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
        }
    }

    pub fn start(&self) -> Option<NaiveDate> {
        parse_date(&self.start_date)
    }

    pub fn end(&self) -> Option<NaiveDate> {
        parse_date(&self.end_date)
    }

    /// Inclusive day count, when both dates parse and are ordered.
    pub fn duration_days(&self) -> Option<i64> {
        let days = (self.end()? - self.start()?).num_days();
        (days >= 0).then_some(days + 1)
    }
}

pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    EventName,
    StartDate,
    EndDate,
}

impl DraftField {
    pub const ALL: [DraftField; 3] = [DraftField::EventName, DraftField::StartDate, DraftField::EndDate];

    pub fn label(&self) -> &'static str {
        match self {
            DraftField::EventName => "Event name",
            DraftField::StartDate => "Start date",
            DraftField::EndDate => "End date",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required fields: {}", field_list(.0))]
    MissingFields(Vec<DraftField>),
}

fn field_list(fields: &[DraftField]) -> String {
    fields.iter().map(|f| f.label()).collect::<Vec<_>>().join(", ")
}

/// Field values submitted to create or update a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub event_name: String,
    pub start_date: String,
    pub end_date: String,
}

impl EventDraft {
    pub fn new(
        event_name: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            event_name: event_name.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
        }
    }

    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::EventName => &self.event_name,
            DraftField::StartDate => &self.start_date,
            DraftField::EndDate => &self.end_date,
        }
    }

    pub fn field_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::EventName => &mut self.event_name,
            DraftField::StartDate => &mut self.start_date,
            DraftField::EndDate => &mut self.end_date,
        }
    }

    pub fn missing_fields(&self) -> Vec<DraftField> {
        DraftField::ALL
            .into_iter()
            .filter(|field| self.field(*field).trim().is_empty())
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields(missing))
        }
    }
}
