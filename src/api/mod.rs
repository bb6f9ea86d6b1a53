pub mod ticket;

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use derive_more::From;
use time::OffsetDateTime;

use crate::store::{self, Store};

pub use self::ticket::Ticket;

/// Builds the ticket API router around an injected store.
pub fn router(store: Arc<dyn Store>) -> Router {
    Router::new()
        .route("/api/tickets", get(list_tickets).post(create_ticket))
        .route(
            "/api/tickets/:id",
            put(update_ticket).delete(delete_ticket),
        )
        .with_state(Arc::new(AppState { store }))
}

type SharedAppState = Arc<AppState>;

struct AppState {
    store: Arc<dyn Store>,
}

async fn list_tickets(
    State(state): State<SharedAppState>,
) -> Result<Json<Vec<Ticket>>, ListTicketsError> {
    let mut tickets = state.store.get_tickets().await?;

    // Newest first; ids break ties between tickets created within the same
    // millisecond.
    tickets.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));

    Ok(Json(tickets))
}

#[derive(Debug, From)]
pub enum ListTicketsError {
    #[from]
    StoreError(store::Error),
}

impl IntoResponse for ListTicketsError {
    fn into_response(self) -> Response {
        match self {
            Self::StoreError(e) => store_error_response(e),
        }
    }
}

async fn create_ticket(
    State(state): State<SharedAppState>,
    Json(input): Json<ticket::CreateTicket>,
) -> Result<(StatusCode, Json<Ticket>), CreateTicketError> {
    use CreateTicketError as E;

    if input.title.trim().is_empty() {
        return Err(E::MissingTitle);
    }

    let mut tickets = state.store.get_tickets().await?;

    let ticket = Ticket {
        id: ticket::Id::next(&tickets),
        title: input.title,
        description: input.description,
        ty: input.ty,
        area: input.area,
        status: ticket::Status::default(),
        created_at: OffsetDateTime::now_utc(),
    };
    tickets.push(ticket.clone());

    state.store.save_tickets(&tickets).await?;

    Ok((StatusCode::CREATED, Json(ticket)))
}

#[derive(Debug, From)]
pub enum CreateTicketError {
    #[from]
    StoreError(store::Error),
    MissingTitle,
}

impl IntoResponse for CreateTicketError {
    fn into_response(self) -> Response {
        match self {
            Self::MissingTitle => {
                (StatusCode::BAD_REQUEST, "title is required".to_owned())
                    .into_response()
            }
            Self::StoreError(e) => store_error_response(e),
        }
    }
}

async fn update_ticket(
    State(state): State<SharedAppState>,
    Path(id): Path<ticket::Id>,
    Json(input): Json<ticket::UpdateTicket>,
) -> Result<Json<Ticket>, UpdateTicketError> {
    use UpdateTicketError as E;

    let mut tickets = state.store.get_tickets().await?;
    let ticket = tickets
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or(E::TicketNotFound)?;

    if let Some(title) = input.title {
        // An empty title would break the "title is never empty" invariant,
        // so it is dropped the same way as an unknown status value.
        if title.trim().is_empty() {
            tracing::warn!(%id, "ignoring empty title in update");
        } else {
            ticket.title = title;
        }
    }
    if let Some(description) = input.description {
        ticket.description = description;
    }
    if let Some(ty) = input.ty {
        ticket.ty = ty;
    }
    if let Some(area) = input.area {
        ticket.area = area;
    }
    if let Some(status) = input.status {
        match ticket::Status::parse(&status) {
            Some(status) => ticket.status = status,
            // Unknown values are dropped, not rejected, to stay compatible
            // with the original API.
            None => {
                tracing::warn!(%id, %status, "ignoring unknown status")
            }
        }
    }

    let updated = ticket.clone();
    state.store.save_tickets(&tickets).await?;

    Ok(Json(updated))
}

#[derive(Debug, From)]
pub enum UpdateTicketError {
    #[from]
    StoreError(store::Error),
    TicketNotFound,
}

impl IntoResponse for UpdateTicketError {
    fn into_response(self) -> Response {
        match self {
            Self::TicketNotFound => {
                (StatusCode::NOT_FOUND, "ticket not found".to_owned())
                    .into_response()
            }
            Self::StoreError(e) => store_error_response(e),
        }
    }
}

async fn delete_ticket(
    State(state): State<SharedAppState>,
    Path(id): Path<ticket::Id>,
) -> Result<Json<ticket::Deleted>, DeleteTicketError> {
    use DeleteTicketError as E;

    let mut tickets = state.store.get_tickets().await?;
    let len_before = tickets.len();
    tickets.retain(|t| t.id != id);
    if tickets.len() == len_before {
        return Err(E::TicketNotFound);
    }

    state.store.save_tickets(&tickets).await?;

    Ok(Json(ticket::Deleted {
        message: format!("ticket {id} deleted"),
    }))
}

#[derive(Debug, From)]
pub enum DeleteTicketError {
    #[from]
    StoreError(store::Error),
    TicketNotFound,
}

impl IntoResponse for DeleteTicketError {
    fn into_response(self) -> Response {
        match self {
            Self::TicketNotFound => {
                (StatusCode::NOT_FOUND, "ticket not found".to_owned())
                    .into_response()
            }
            Self::StoreError(e) => store_error_response(e),
        }
    }
}

fn store_error_response(e: store::Error) -> Response {
    tracing::error!("store error: {e}");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
}
