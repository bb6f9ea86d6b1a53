use std::net;

use serde::Deserialize;

#[derive(Deserialize)]
pub struct Config {
    pub store: Store,
    pub http: Http,
}

#[derive(Deserialize)]
pub struct Store {
    pub url: String,
}

#[derive(Deserialize)]
pub struct Http {
    pub server: Server,
    pub cors: Cors,
}

#[derive(Deserialize)]
pub struct Server {
    pub addr: net::SocketAddr,
}

#[derive(Deserialize)]
pub struct Cors {
    pub allowed_origins: Vec<String>,
}
