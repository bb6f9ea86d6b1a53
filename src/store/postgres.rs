use async_trait::async_trait;
use tokio_postgres::{tls::NoTlsStream, NoTls, Socket};

use crate::config;

use super::{Error, Store, Ticket};

/// Key under which the whole ticket collection is stored.
const TICKETS_KEY: &str = "tickets";

pub type Connection = tokio_postgres::Connection<Socket, NoTlsStream>;

pub async fn connect(
    config: &config::Store,
) -> Result<(Client, Connection), tokio_postgres::Error> {
    tokio_postgres::connect(&config.url, NoTls)
        .await
        .map(|(client, connection)| (Client(client), connection))
}

pub struct Client(tokio_postgres::Client);

impl Client {
    /// Creates the key-value table if it is missing. Must run after the
    /// connection driver has been spawned.
    pub async fn init(&self) -> Result<(), tokio_postgres::Error> {
        const SQL: &str = "\
            CREATE TABLE IF NOT EXISTS kv ( \
                key TEXT PRIMARY KEY, \
                value TEXT NOT NULL)";
        self.0.execute(SQL, &[]).await.map(drop)
    }
}

#[async_trait]
impl Store for Client {
    async fn get_tickets(&self) -> Result<Vec<Ticket>, Error> {
        const SQL: &str = "SELECT value FROM kv WHERE key = $1";
        match self.0.query_opt(SQL, &[&TICKETS_KEY]).await? {
            Some(row) => Ok(serde_json::from_str(row.get(0))?),
            None => Ok(Vec::new()),
        }
    }

    async fn save_tickets(&self, tickets: &[Ticket]) -> Result<(), Error> {
        const SQL: &str = "\
            INSERT INTO kv (key, value) VALUES ($1, $2) \
            ON CONFLICT (key) DO UPDATE \
            SET value = EXCLUDED.value";

        let value = serde_json::to_string(tickets)?;
        self.0.execute(SQL, &[&TICKETS_KEY, &value]).await?;
        Ok(())
    }
}
