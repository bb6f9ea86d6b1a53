use serde::{Deserialize, Serialize};

pub use crate::store::ticket::{
    Id, Status, Ticket, DEFAULT_AREA, DEFAULT_TYPE,
};

/// Body of `POST /api/tickets`.
#[derive(Debug, Deserialize, Serialize)]
pub struct CreateTicket {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default = "default_type", rename = "type")]
    pub ty: String,

    #[serde(default = "default_area")]
    pub area: String,
}

fn default_type() -> String {
    DEFAULT_TYPE.to_owned()
}

fn default_area() -> String {
    DEFAULT_AREA.to_owned()
}

/// Body of `PUT /api/tickets/:id`. Absent fields leave the stored values
/// untouched.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdateTicket {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,

    /// Kept as the raw wire string: an unrecognized value is dropped, not
    /// rejected, to stay compatible with the original API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Body of a successful `DELETE /api/tickets/:id`.
#[derive(Debug, Deserialize, Serialize)]
pub struct Deleted {
    pub message: String,
}
