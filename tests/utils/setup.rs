use super::request::RequestBuilder;
use cricket_backend::{Config, HashingCost, State};
use migration::MigratorTrait;
use reqwest::Client;
use sea_orm::{ConnectOptions, Database, DbConn};
use std::net::SocketAddr;
use tokio::net::TcpListener;

const DATABASE_URL: &str = "sqlite::memory:";
const JWT_SECRET: &str = "integration-test-secret";

/// A server with its own empty database, alive for the duration of one test.
#[derive(Clone)]
pub struct App {
    pub addr: SocketAddr,
    pub client: Client,
    pub db: DbConn,
}

async fn setup_database() -> DbConn {
    // every connection to an in-memory database sees a different database
    let mut opts = ConnectOptions::new(DATABASE_URL.to_owned());
    opts.max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(opts)
        .await
        .expect("failed to open database");

    migration::Migrator::up(&db, None)
        .await
        .expect("failed to apply migrations");

    db
}

async fn setup_backend(db: DbConn) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut config = Config::new(DATABASE_URL, JWT_SECRET);
    config.hashing = HashingCost::minimal();

    let state = State::with_database(config, db).expect("failed to create state");

    tokio::spawn(async move {
        cricket_backend::run(listener, state).await.unwrap();
    });

    addr
}

impl App {
    pub async fn new() -> App {
        let db = setup_database().await;
        let addr = setup_backend(db.clone()).await;

        App {
            addr,
            client: Client::new(),
            db,
        }
    }

    pub fn url(&self, url: &str) -> String {
        format!("http://{}{}", self.addr, url)
    }

    #[allow(unused)]
    pub fn get(&self, url: &str) -> RequestBuilder {
        RequestBuilder::new(self.client.get(self.url(url)))
    }

    #[allow(unused)]
    pub fn post(&self, url: &str) -> RequestBuilder {
        RequestBuilder::new(self.client.post(self.url(url)))
    }

    #[allow(unused)]
    pub fn put(&self, url: &str) -> RequestBuilder {
        RequestBuilder::new(self.client.put(self.url(url)))
    }

    #[allow(unused)]
    pub fn delete(&self, url: &str) -> RequestBuilder {
        RequestBuilder::new(self.client.delete(self.url(url)))
    }
}
