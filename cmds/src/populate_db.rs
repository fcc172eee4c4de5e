//! Fills an empty database with a small league: staff accounts, five teams
//! with full squads and a season of match results.

use anyhow::{anyhow, Context};
use chrono::{Days, Utc};
use cricket_backend::{
    password::Passwords,
    standings::{record_match, Fixture},
    HashingCost,
};
use entity::{
    matches,
    players::{self, PlayerType, PLAYING_XI},
    teams,
    users::{self, Role},
};
use migration::{Migrator, MigratorTrait};
use rand::{rngs::ThreadRng, seq::SliceRandom, Rng};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, Set, TransactionTrait,
};
use std::env;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

const TEAMS: usize = 5;
const MATCHES: u64 = 20;
const DAYS_BETWEEN_MATCHES: u64 = 9;
const SEASON_LENGTH_DAYS: u64 = 180;
const PASSWORD: &str = "password123";

const TEAM_NAMES: &[&str] = &[
    "Harbour Strikers",
    "Northern Falcons",
    "Riverside Royals",
    "Summit Chargers",
    "Coastal Titans",
];
const COUNTRIES: &[&str] = &[
    "India",
    "Australia",
    "England",
    "South Africa",
    "New Zealand",
    "Pakistan",
    "Sri Lanka",
    "West Indies",
];
const VENUES: &[&str] = &[
    "Mumbai", "Melbourne", "London", "Durban", "Auckland", "Lahore", "Colombo", "Bridgetown",
];
const FIRST_NAMES: &[&str] = &[
    "Arjun", "Ben", "Chris", "Dev", "Ethan", "Faf", "Glenn", "Hashim", "Imran", "Jason", "Kane",
    "Liam", "Mitchell", "Nathan", "Ollie", "Pat", "Quinton", "Rohit", "Steve", "Tom",
];
const LAST_NAMES: &[&str] = &[
    "Ahmed", "Brown", "Clarke", "Dhawan", "Evans", "Fernando", "Green", "Hussain", "Iyer",
    "Jones", "Khan", "Lyon", "Morgan", "Nair", "Patel", "Root", "Smith", "Taylor", "Williams",
];

struct Seeder {
    db: DatabaseConnection,
    rng: ThreadRng,
    password_hash: String,
    next_user: usize,
}

impl Seeder {
    async fn user(&mut self, prefix: &str, category: Role) -> anyhow::Result<users::Model> {
        self.next_user += 1;

        let first_name = *FIRST_NAMES.choose(&mut self.rng).unwrap_or(&"Sam");
        let last_name = *LAST_NAMES.choose(&mut self.rng).unwrap_or(&"Lee");
        let username = format!(
            "{prefix}{}{}",
            first_name.to_lowercase(),
            self.next_user
        );

        let user = users::ActiveModel {
            email: Set(format!("{username}@example.com")),
            username: Set(username),
            first_name: Set(first_name.to_owned()),
            last_name: Set(last_name.to_owned()),
            password: Set(self.password_hash.clone()),
            category: Set(category),
            date_joined: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(user)
    }

    async fn player(
        &mut self,
        user: &users::Model,
        team: i32,
        kind: PlayerType,
        ages: (i32, i32),
        is_playing: bool,
    ) -> anyhow::Result<()> {
        players::ActiveModel {
            user_id: Set(user.id),
            age: Set(self.rng.gen_range(ages.0..=ages.1)),
            kind: Set(kind),
            team: Set(team),
            matches_played: Set(0),
            total_runs: Set(0),
            wickets: Set(0),
            is_playing: Set(is_playing),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(())
    }

    fn player_type(&mut self) -> PlayerType {
        *PlayerType::ALL
            .choose(&mut self.rng)
            .unwrap_or(&PlayerType::Batter)
    }

    async fn admin(&mut self, passwords: &Passwords) -> anyhow::Result<()> {
        let hash = passwords.hash("adminpassword").map_err(|e| anyhow!("{e}"))?;

        users::ActiveModel {
            username: Set("admin".to_owned()),
            email: Set("admin@example.com".to_owned()),
            first_name: Set(String::new()),
            last_name: Set(String::new()),
            password: Set(hash),
            category: Set(Role::Admin),
            date_joined: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        info!("created admin user");
        Ok(())
    }

    async fn teams(&mut self) -> anyhow::Result<Vec<teams::Model>> {
        let mut created = Vec::with_capacity(TEAMS);

        for name in TEAM_NAMES.iter().take(TEAMS) {
            let country = *COUNTRIES.choose(&mut self.rng).unwrap_or(&"India");
            let team = teams::ActiveModel {
                name: Set((*name).to_owned()),
                country: Set(country.to_owned()),
                matches_played: Set(0),
                wins: Set(0),
                lost: Set(0),
                draw: Set(0),
                points: Set(0),
                created_at: Set(Utc::now()),
                ..Default::default()
            }
            .insert(&self.db)
            .await?;

            created.push(team);
        }

        info!("created {} teams", created.len());
        Ok(created)
    }

    async fn organisers(&mut self) -> anyhow::Result<()> {
        for _ in 0..TEAMS {
            self.user("org_", Role::Organiser).await?;
        }

        info!("created organisers");
        Ok(())
    }

    /// One captain per team, always batting in the playing XI.
    async fn captains(&mut self, teams: &[teams::Model]) -> anyhow::Result<()> {
        for team in teams {
            let captain = self.user("captain_", Role::Captain).await?;

            teams::ActiveModel {
                id: Set(team.id),
                captain: Set(Some(captain.id)),
                ..Default::default()
            }
            .update(&self.db)
            .await?;

            self.player(&captain, team.id, PlayerType::Batter, (24, 35), true)
                .await?;
        }

        info!("created captains");
        Ok(())
    }

    async fn squads(&mut self, teams: &[teams::Model]) -> anyhow::Result<()> {
        for team in teams {
            let playing = players::Entity::find_playing_xi(team.id)
                .count(&self.db)
                .await?;

            for _ in playing..PLAYING_XI {
                let user = self.user("", Role::Player).await?;
                let kind = self.player_type();
                self.player(&user, team.id, kind, (18, 35), true).await?;
            }

            for _ in 0..self.rng.gen_range(3..=7) {
                let user = self.user("", Role::Player).await?;
                let kind = self.player_type();
                self.player(&user, team.id, kind, (18, 35), false).await?;
            }
        }

        info!("created players");
        Ok(())
    }

    async fn season(&mut self, teams: &[teams::Model]) -> anyhow::Result<()> {
        let start = Utc::now()
            .date_naive()
            .checked_sub_days(Days::new(SEASON_LENGTH_DAYS))
            .context("season start out of range")?;

        for round in 0..MATCHES {
            let mut pair = teams.choose_multiple(&mut self.rng, 2).map(|team| team.id);
            let (Some(team1), Some(team2)) = (pair.next(), pair.next()) else {
                anyhow::bail!("need at least two teams for a match");
            };
            let winner = *[Some(team1), Some(team2), None]
                .choose(&mut self.rng)
                .unwrap_or(&None);

            let date = start
                .checked_add_days(Days::new(round * DAYS_BETWEEN_MATCHES))
                .context("match date out of range")?;
            let venue = *VENUES.choose(&mut self.rng).unwrap_or(&"Mumbai");

            let txn = self.db.begin().await?;
            matches::ActiveModel {
                date: Set(date),
                venue: Set(venue.to_owned()),
                team1: Set(team1),
                team2: Set(team2),
                winner: Set(winner),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            record_match(&txn, &Fixture { team1, team2, winner }).await?;
            txn.commit().await?;

            self.performances(&[team1, team2]).await?;
        }

        info!("created {MATCHES} matches");
        Ok(())
    }

    /// Random runs and wickets for everyone who just played.
    async fn performances(&mut self, teams: &[i32]) -> anyhow::Result<()> {
        let playing = players::Entity::find()
            .filter(players::Column::Team.is_in(teams.iter().copied()))
            .filter(players::Column::IsPlaying.eq(true))
            .all(&self.db)
            .await?;

        for player in playing {
            let runs = if player.kind.bats() {
                self.rng.gen_range(0..=50)
            } else {
                0
            };
            let wickets = if player.kind.bowls() {
                self.rng.gen_range(0..=3)
            } else {
                0
            };

            players::Entity::update_many()
                .col_expr(
                    players::Column::TotalRuns,
                    Expr::col(players::Column::TotalRuns).add(runs),
                )
                .col_expr(
                    players::Column::Wickets,
                    Expr::col(players::Column::Wickets).add(wickets),
                )
                .filter(players::Column::Id.eq(player.id))
                .exec(&self.db)
                .await?;
        }

        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let url = env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
    let db = Database::connect(&url).await?;
    Migrator::up(&db, None).await?;

    let passwords = Passwords::new(HashingCost::default()).map_err(|e| anyhow!("{e}"))?;
    // every seeded account except the admin shares one password
    let password_hash = passwords.hash(PASSWORD).map_err(|e| anyhow!("{e}"))?;

    let mut seeder = Seeder {
        db,
        rng: rand::thread_rng(),
        password_hash,
        next_user: 0,
    };

    seeder.admin(&passwords).await?;
    let teams = seeder.teams().await?;
    seeder.organisers().await?;
    seeder.captains(&teams).await?;
    seeder.squads(&teams).await?;
    seeder.season(&teams).await?;

    let players = players::Entity::find().count(&seeder.db).await?;
    let matches = matches::Entity::find().count(&seeder.db).await?;
    info!("seeded {} teams, {players} players and {matches} matches", teams.len());

    Ok(())
}
