use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};

use async_trait::async_trait;

use super::{Error, Store, Ticket};

/// In-process store backend. Keeps the collection in its serialized form so
/// reads and writes go through the same JSON codec as the real backend, and
/// can be flipped into an unavailable state to exercise failure paths.
#[derive(Debug)]
pub struct Memory {
    value: Mutex<Option<String>>,
    available: AtomicBool,
}

impl Memory {
    pub fn new() -> Self {
        Self {
            value: Mutex::new(None),
            available: AtomicBool::new(true),
        }
    }

    /// Simulates the backing connection going down (or coming back up).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), Error> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(Error::Unavailable("connection refused".into()))
        }
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for Memory {
    async fn get_tickets(&self) -> Result<Vec<Ticket>, Error> {
        self.check_available()?;

        let value = self.value.lock().unwrap().clone();
        match value {
            Some(value) => Ok(serde_json::from_str(&value)?),
            None => Ok(Vec::new()),
        }
    }

    async fn save_tickets(&self, tickets: &[Ticket]) -> Result<(), Error> {
        self.check_available()?;

        let value = serde_json::to_string(tickets)?;
        *self.value.lock().unwrap() = Some(value);
        Ok(())
    }
}
