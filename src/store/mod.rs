pub mod memory;
pub mod postgres;
pub mod ticket;

use std::fmt;

use async_trait::async_trait;
use derive_more::From;

pub use self::{
    memory::Memory,
    postgres::{connect, Client, Connection},
    ticket::Ticket,
};

/// Access to the key-value persistence layer. The whole ticket collection
/// lives under a single key: `get_tickets` loads it in full and
/// `save_tickets` overwrites it in full. There is no per-record addressing
/// and no concurrency token, so two callers racing through a
/// read-modify-write can clobber each other's changes (see DESIGN.md).
#[async_trait]
pub trait Store: Send + Sync {
    /// Returns the current full collection, empty if the key is absent.
    async fn get_tickets(&self) -> Result<Vec<Ticket>, Error>;

    /// Serializes the collection and replaces the stored value in a single
    /// write.
    async fn save_tickets(&self, tickets: &[Ticket]) -> Result<(), Error>;
}

#[derive(Debug, From)]
pub enum Error {
    /// The underlying connection cannot be reached.
    Unavailable(String),

    /// The stored value is not a valid ticket collection.
    #[from]
    Codec(serde_json::Error),
}

impl From<tokio_postgres::Error> for Error {
    fn from(e: tokio_postgres::Error) -> Self {
        Self::Unavailable(e.to_string())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(e) => write!(f, "store unavailable: {e}"),
            Self::Codec(e) => {
                write!(f, "malformed ticket collection: {e}")
            }
        }
    }
}
