use anyhow::{anyhow, bail, Context};
use cricket_backend::{password::Passwords, HashingCost};
use entity::users::{self, Role};
use sea_orm::{ActiveModelTrait, Database, Set};
use std::env::{self, args};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut args = args().skip(1);
    let (Some(username), Some(password)) = (args.next(), args.next()) else {
        bail!("usage: create_admin_user <username> <password> [email]");
    };
    let email = args.next().unwrap_or_default();

    let url = env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
    let db = Database::connect(&url).await?;

    if users::Entity::find_by_username(&username)
        .one(&db)
        .await?
        .is_some()
    {
        bail!("user {username:?} already exists");
    }

    let passwords = Passwords::new(HashingCost::default()).map_err(|e| anyhow!("{e}"))?;
    let hash = passwords.hash(&password).map_err(|e| anyhow!("{e}"))?;

    let user = users::ActiveModel {
        username: Set(username),
        email: Set(email),
        first_name: Set(String::new()),
        last_name: Set(String::new()),
        password: Set(hash),
        category: Set(Role::Admin),
        date_joined: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&db)
    .await?;

    println!("created admin user {} with id {}", user.username, user.id);

    Ok(())
}
