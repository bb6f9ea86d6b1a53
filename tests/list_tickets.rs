pub mod common;

use axum::http::{Method, StatusCode};
use time::{macros::datetime, OffsetDateTime};

use helpdesk::store::{
    ticket::{Id, Status, Ticket, DEFAULT_AREA, DEFAULT_TYPE},
    Store as _,
};

fn ticket(id: i64, created_at: OffsetDateTime) -> Ticket {
    Ticket {
        id: Id::from(id),
        title: format!("Ticket {id}"),
        description: String::new(),
        ty: DEFAULT_TYPE.to_owned(),
        area: DEFAULT_AREA.to_owned(),
        status: Status::Open,
        created_at,
    }
}

#[tokio::test]
async fn empty_collection_lists_as_empty_array() {
    let (app, _) = common::app();

    assert_eq!(common::list(&app).await.len(), 0);
}

#[tokio::test]
async fn lists_newest_first() {
    let (app, store) = common::app();
    store
        .save_tickets(&[
            ticket(1, datetime!(2024-06-01 09:00 UTC)),
            ticket(3, datetime!(2024-06-01 11:00 UTC)),
            ticket(2, datetime!(2024-06-01 10:00 UTC)),
        ])
        .await
        .unwrap();

    let ids = common::list(&app)
        .await
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect::<Vec<_>>();

    assert_eq!(ids, [3, 2, 1]);
}

#[tokio::test]
async fn breaks_created_at_ties_by_id() {
    let (app, store) = common::app();
    let t = datetime!(2024-06-01 09:00 UTC);
    store
        .save_tickets(&[ticket(1, t), ticket(3, t), ticket(2, t)])
        .await
        .unwrap();

    let ids = common::list(&app)
        .await
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect::<Vec<_>>();

    assert_eq!(ids, [3, 2, 1]);
}

#[tokio::test]
async fn created_tickets_all_appear_exactly_once() {
    let (app, _) = common::app();

    let mut created = Vec::new();
    for i in 1..=5 {
        let ticket = common::create(&app, &format!("Ticket {i}")).await;
        created.push(ticket["id"].as_i64().unwrap());
    }

    let mut listed = common::list(&app)
        .await
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect::<Vec<_>>();
    listed.sort_unstable();
    created.sort_unstable();

    assert_eq!(listed, created);
}

#[tokio::test]
async fn unavailable_store_is_500() {
    let (app, store) = common::app();
    store.set_available(false);

    let (status, body) =
        common::request(&app, Method::GET, "/api/tickets", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body.as_str().expect("expected an error message");
    assert!(message.contains("store unavailable"), "{message}");
}
