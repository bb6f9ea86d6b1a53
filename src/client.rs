//! Boundary consumer of the ticket API: a thin HTTP client plus the view
//! state a frontend keeps between calls (cached collection, active filter,
//! open edit form).

use std::fmt;

use derive_more::From;
use reqwest::StatusCode;

use crate::api::ticket::{
    self, CreateTicket, Id, Status, Ticket, UpdateTicket, DEFAULT_AREA,
    DEFAULT_TYPE,
};

/// Wrapper over the four REST endpoints.
pub struct Api {
    inner: reqwest::Client,
    base_url: String,
}

impl Api {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            inner: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub async fn list_tickets(&self) -> Result<Vec<Ticket>, Error> {
        Ok(self
            .inner
            .get(format!("{}/api/tickets", self.base_url))
            .send()
            .await?
            .error_for_status()
            .map_err(status_error)?
            .json()
            .await?)
    }

    pub async fn create_ticket(
        &self,
        input: &CreateTicket,
    ) -> Result<Ticket, Error> {
        Ok(self
            .inner
            .post(format!("{}/api/tickets", self.base_url))
            .json(input)
            .send()
            .await?
            .error_for_status()
            .map_err(status_error)?
            .json()
            .await?)
    }

    pub async fn update_ticket(
        &self,
        id: Id,
        input: &UpdateTicket,
    ) -> Result<Ticket, Error> {
        Ok(self
            .inner
            .put(format!("{}/api/tickets/{id}", self.base_url))
            .json(input)
            .send()
            .await?
            .error_for_status()
            .map_err(status_error)?
            .json()
            .await?)
    }

    pub async fn delete_ticket(
        &self,
        id: Id,
    ) -> Result<ticket::Deleted, Error> {
        Ok(self
            .inner
            .delete(format!("{}/api/tickets/{id}", self.base_url))
            .send()
            .await?
            .error_for_status()
            .map_err(status_error)?
            .json()
            .await?)
    }
}

fn status_error(e: reqwest::Error) -> Error {
    match e.status() {
        Some(status) => Error::Status(status),
        None => Error::Http(e),
    }
}

#[derive(Debug, From)]
pub enum Error {
    /// The request never completed or the response could not be decoded.
    #[from]
    Http(reqwest::Error),

    /// The server answered with a failure status.
    Status(StatusCode),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => e.fmt(f),
            Self::Status(status) => {
                write!(f, "server responded with {status}")
            }
        }
    }
}

/// Which tickets the frontend currently shows. Filtering is a client
/// concern; the server always returns the whole collection.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Filter {
    #[default]
    All,
    Status(Status),
}

impl Filter {
    /// Parses `all` or a status spelling.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Self::All),
            _ => Status::parse(s).map(Self::Status),
        }
    }

    fn matches(&self, ticket: &Ticket) -> bool {
        match self {
            Self::All => true,
            Self::Status(status) => ticket.status == *status,
        }
    }
}

/// View state of the frontend: the last fetched collection, the active
/// filter, and which ticket (if any) an edit form is open for. Create and
/// update patch the cache with the record the server returned instead of
/// re-fetching the whole collection; delete drops the row on success.
pub struct Controller {
    api: Api,
    tickets: Vec<Ticket>,
    filter: Filter,
    editing: Option<Id>,
}

impl Controller {
    pub fn new(api: Api) -> Self {
        Self {
            api,
            tickets: Vec::new(),
            filter: Filter::default(),
            editing: None,
        }
    }

    /// Re-fetches the whole collection.
    pub async fn refresh(&mut self) -> Result<(), Error> {
        self.tickets = self.api.list_tickets().await?;
        Ok(())
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Cached tickets matching the active filter, in server order.
    pub fn visible(&self) -> impl Iterator<Item = &Ticket> {
        self.tickets.iter().filter(|t| self.filter.matches(t))
    }

    /// Opens the edit form for `id`, pre-populated from the cached record.
    /// Returns `None` (and leaves no form open) for an unknown id.
    pub fn begin_edit(&mut self, id: Id) -> Option<&Ticket> {
        let ticket = self.tickets.iter().find(|t| t.id == id)?;
        self.editing = Some(id);
        Some(ticket)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn editing(&self) -> Option<Id> {
        self.editing
    }

    /// Routes a submitted form: update if an edit form is open, create
    /// otherwise. Closes the form either way.
    pub async fn submit(
        &mut self,
        form: UpdateTicket,
    ) -> Result<&Ticket, Error> {
        match self.editing.take() {
            Some(id) => {
                let updated = self.api.update_ticket(id, &form).await?;
                Ok(self.patch(updated))
            }
            None => {
                let input = CreateTicket {
                    title: form.title.unwrap_or_default(),
                    description: form.description.unwrap_or_default(),
                    ty: form
                        .ty
                        .unwrap_or_else(|| DEFAULT_TYPE.to_owned()),
                    area: form
                        .area
                        .unwrap_or_else(|| DEFAULT_AREA.to_owned()),
                };
                let created = self.api.create_ticket(&input).await?;
                Ok(self.patch(created))
            }
        }
    }

    pub async fn delete(&mut self, id: Id) -> Result<String, Error> {
        let deleted = self.api.delete_ticket(id).await?;
        self.tickets.retain(|t| t.id != id);
        Ok(deleted.message)
    }

    fn patch(&mut self, ticket: Ticket) -> &Ticket {
        match self.tickets.iter().position(|t| t.id == ticket.id) {
            Some(i) => {
                self.tickets[i] = ticket;
                &self.tickets[i]
            }
            None => {
                // The list is newest first, so fresh records go on top.
                self.tickets.insert(0, ticket);
                &self.tickets[0]
            }
        }
    }
}
