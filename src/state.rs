use crate::{config::Config, jwt::Jwt, password::Passwords};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DbConn, TransactionTrait};
use std::sync::Arc;
use tracing::log::LevelFilter;

pub trait StateTrait: Send + Sync + Clone + 'static {
    type Db: ConnectionTrait + TransactionTrait + Clone;

    fn db(&self) -> &Self::Db;
    fn jwt(&self) -> &Jwt;
    fn passwords(&self) -> &Passwords;
}

pub struct State {
    database: DbConn,
    jwt: Jwt,
    passwords: Passwords,
}

impl State {
    pub async fn new(config: Config) -> anyhow::Result<Arc<Self>> {
        let conn = Self::connect_database(&config.database_url).await?;
        Self::with_database(config, conn)
    }

    pub fn with_database(config: Config, conn: DbConn) -> anyhow::Result<Arc<Self>> {
        let passwords = Passwords::new(config.hashing)
            .map_err(|error| anyhow::anyhow!("invalid argon2 parameters: {error}"))?;

        Ok(Arc::new(Self {
            database: conn,
            jwt: Jwt::new(&config),
            passwords,
        }))
    }

    async fn connect_database(url: &str) -> anyhow::Result<DbConn> {
        info!("Trying to connect to database");

        let mut opts = ConnectOptions::new(url.to_owned());
        opts.sqlx_logging_level(LevelFilter::Debug);

        let db = Database::connect(opts)
            .await
            .inspect_err(|error| error!("failed to connect to database: {error}"))?;

        info!("Connected to database");

        Ok(db)
    }
}

impl StateTrait for Arc<State> {
    type Db = DbConn;

    fn db(&self) -> &Self::Db {
        &self.database
    }

    fn jwt(&self) -> &Jwt {
        &self.jwt
    }

    fn passwords(&self) -> &Passwords {
        &self.passwords
    }
}
