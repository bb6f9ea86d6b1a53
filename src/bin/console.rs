//! Line-oriented console frontend for the ticket API. Every failure is
//! printed as-is and never retried; the server stays the source of truth.

use std::{env, error::Error};

use tokio::io::{self, AsyncBufReadExt as _, AsyncWriteExt as _, BufReader};

use helpdesk::{
    api::ticket::{Id, UpdateTicket},
    client::{Api, Controller, Filter},
};

const HELP: &str = "\
commands:
  list                      fetch and show tickets (active filter applied)
  filter <all|open|in-progress|closed>
  add <title>               create a ticket
  edit <id> [field=value]*  update fields (title, description, type, area, status)
  rm <id>                   delete a ticket
  quit";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let base_url = env::var("HELPDESK_URL")
        .unwrap_or_else(|_| "http://localhost:3000".to_owned());
    let mut controller = Controller::new(Api::new(base_url));

    match controller.refresh().await {
        Ok(()) => print_tickets(&controller),
        Err(e) => println!("error: {e}"),
    }

    let mut stdout = io::stdout();
    let mut lines = BufReader::new(io::stdin()).lines();
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));

        match command {
            "" => {}
            "help" => println!("{HELP}"),
            "quit" | "exit" => break,
            "list" => match controller.refresh().await {
                Ok(()) => print_tickets(&controller),
                Err(e) => println!("error: {e}"),
            },
            "filter" => match Filter::parse(rest.trim()) {
                Some(filter) => {
                    controller.set_filter(filter);
                    print_tickets(&controller);
                }
                None => println!("unknown filter: {rest}"),
            },
            "add" => {
                let form = UpdateTicket {
                    title: Some(rest.trim().to_owned()),
                    ..UpdateTicket::default()
                };
                match controller.submit(form).await {
                    Ok(ticket) => println!("created ticket {}", ticket.id),
                    Err(e) => println!("error: {e}"),
                }
            }
            "edit" => {
                let (id, pairs) =
                    rest.trim().split_once(' ').unwrap_or((rest.trim(), ""));
                let Some(id) = parse_id(id) else {
                    println!("usage: edit <id> [field=value]*");
                    continue;
                };
                let Some(form) = parse_form(pairs) else {
                    continue;
                };
                if controller.begin_edit(id).is_none() {
                    println!("no cached ticket {id}, run `list` first");
                    continue;
                }
                match controller.submit(form).await {
                    Ok(ticket) => println!(
                        "updated ticket {} ({})",
                        ticket.id,
                        ticket.status.as_str(),
                    ),
                    Err(e) => println!("error: {e}"),
                }
            }
            "rm" => {
                let Some(id) = parse_id(rest.trim()) else {
                    println!("usage: rm <id>");
                    continue;
                };
                match controller.delete(id).await {
                    Ok(message) => println!("{message}"),
                    Err(e) => println!("error: {e}"),
                }
            }
            _ => println!("unknown command (try `help`)"),
        }
    }

    Ok(())
}

fn print_tickets(controller: &Controller) {
    let mut count = 0;
    for ticket in controller.visible() {
        count += 1;
        println!(
            "{}  {:11}  {}  [{} / {}]",
            ticket.id,
            ticket.status.as_str(),
            ticket.title,
            ticket.ty,
            ticket.area,
        );
    }
    println!("{count} ticket(s)");
}

fn parse_id(s: &str) -> Option<Id> {
    s.parse::<i64>().ok().map(Id::from)
}

fn parse_form(pairs: &str) -> Option<UpdateTicket> {
    let mut form = UpdateTicket::default();
    for pair in pairs.split_whitespace() {
        let Some((field, value)) = pair.split_once('=') else {
            println!("expected field=value, got: {pair}");
            return None;
        };
        let value = Some(value.to_owned());
        match field {
            "title" => form.title = value,
            "description" => form.description = value,
            "type" => form.ty = value,
            "area" => form.area = value,
            "status" => form.status = value,
            _ => {
                println!("unknown field: {field}");
                return None;
            }
        }
    }
    Some(form)
}
