use derive_more::Display;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

pub const DEFAULT_TYPE: &str = "General Inquiry";
pub const DEFAULT_AREA: &str = "IT Support";

/// One help-desk request. The whole set of tickets is persisted as a single
/// JSON array under one key, so this type is both the stored and the wire
/// representation.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Ticket {
    pub id: Id,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub area: String,
    pub status: Status,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct Id(i64);

impl Id {
    /// Picks an id for a new ticket: the current unix time in milliseconds,
    /// bumped past any id already taken so that two tickets created within
    /// the same millisecond still get distinct ids.
    pub fn next(taken: &[Ticket]) -> Self {
        let millis = OffsetDateTime::now_utc().unix_timestamp_nanos()
            / 1_000_000;
        let mut id = Self(millis as i64);
        while taken.iter().any(|t| t.id == id) {
            id.0 += 1;
        }
        id
    }
}

impl From<i64> for Id {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Open,

    InProgress,

    Closed,
}

impl Status {
    /// Parses the wire spelling of a status (`open`, `in-progress`,
    /// `closed`). Returns `None` for anything else.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "open" => Some(Self::Open),
            "in-progress" => Some(Self::InProgress),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }

    /// The wire spelling of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in-progress",
            Self::Closed => "closed",
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    fn ticket(id: i64) -> Ticket {
        Ticket {
            id: Id::from(id),
            title: "Printer on fire".into(),
            description: String::new(),
            ty: DEFAULT_TYPE.into(),
            area: DEFAULT_AREA.into(),
            status: Status::Open,
            created_at: datetime!(2024-06-01 12:00 UTC),
        }
    }

    #[test]
    fn next_id_skips_taken_ids() {
        let first = Id::next(&[]);
        let taken = vec![ticket(first.0), ticket(first.0 + 1)];
        let second = Id::next(&taken);
        assert!(taken.iter().all(|t| t.id != second));
    }

    #[test]
    fn status_round_trips_through_wire_spelling() {
        for (s, status) in [
            ("open", Status::Open),
            ("in-progress", Status::InProgress),
            ("closed", Status::Closed),
        ] {
            assert_eq!(Status::parse(s), Some(status));
            assert_eq!(
                serde_json::to_value(status).unwrap(),
                serde_json::Value::String(s.into()),
            );
        }
        assert_eq!(Status::parse("archived"), None);
    }

    #[test]
    fn ticket_serializes_with_wire_field_names() {
        let value = serde_json::to_value(ticket(1717243200000)).unwrap();
        assert_eq!(value["id"], 1717243200000i64);
        assert_eq!(value["type"], DEFAULT_TYPE);
        assert_eq!(value["area"], DEFAULT_AREA);
        assert_eq!(value["status"], "open");
        assert_eq!(value["created_at"], "2024-06-01T12:00:00Z");
    }
}
