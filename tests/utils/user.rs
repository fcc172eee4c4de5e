use super::{setup::App, unique};
use http::StatusCode;
use serde_json::{json, Value};

pub const PASSWORD: &str = "Wicket-Keeper-42";

pub trait UserLike {
    fn access_token(&self) -> &str;
}

#[allow(unused)]
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub category: &'static str,
    pub access_token: String,
    pub refresh_token: String,
}

impl UserLike for User {
    fn access_token(&self) -> &str {
        &self.access_token
    }
}

/// A bearer token the server never issued.
#[allow(unused)]
pub struct Token(pub String);

impl UserLike for Token {
    fn access_token(&self) -> &str {
        &self.0
    }
}

#[allow(unused)]
impl App {
    pub async fn register_user(&self, category: &'static str) -> User {
        let username = format!("{}{}", category.to_lowercase(), unique());

        let res = self
            .post("/api/register")
            .json(&json!({
                "username": username,
                "password": PASSWORD,
                "password2": PASSWORD,
                "email": format!("{username}@example.com"),
                "category": category,
            }))
            .send()
            .await;

        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = res.json().await;
        let id = body["data"]["id"].as_i64().expect("no user id") as i32;

        let (access_token, refresh_token) = self.login(&username, PASSWORD).await;

        User {
            id,
            username,
            category,
            access_token,
            refresh_token,
        }
    }

    pub async fn admin(&self) -> User {
        self.register_user("ADMIN").await
    }

    pub async fn organiser(&self) -> User {
        self.register_user("ORGANISER").await
    }

    pub async fn captain(&self) -> User {
        self.register_user("CAPTAIN").await
    }

    pub async fn player(&self) -> User {
        self.register_user("PLAYER").await
    }

    pub async fn login(&self, username: &str, password: &str) -> (String, String) {
        let res = self
            .post("/api/token")
            .json(&json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = res.json().await;

        (
            body["access"].as_str().expect("no access token").to_owned(),
            body["refresh"].as_str().expect("no refresh token").to_owned(),
        )
    }

    /// Creates a team and returns its representation.
    pub async fn create_team(&self, organiser: &User, name: &str) -> Value {
        let res = self
            .post("/api/teams")
            .user(organiser)
            .json(&json!({
                "name": name,
                "country": "India",
            }))
            .send()
            .await;

        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = res.json().await;
        body["data"].clone()
    }

    /// Registers a new PLAYER user and gives them a profile in `team`.
    pub async fn create_player(&self, staff: &User, team: i64, is_playing: bool) -> (User, Value) {
        let user = self.player().await;

        let res = self
            .post("/api/players")
            .user(staff)
            .json(&json!({
                "user_id": user.id,
                "age": 25,
                "type": "BOWLER",
                "team": team,
                "is_playing": is_playing,
            }))
            .send()
            .await;

        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = res.json().await;
        (user, body["data"].clone())
    }

    pub async fn create_match(
        &self,
        organiser: &User,
        team1: i64,
        team2: i64,
        winner: Option<i64>,
    ) -> Value {
        let res = self
            .post("/api/matches")
            .user(organiser)
            .json(&json!({
                "date": "2025-03-01",
                "venue": "Eden Gardens",
                "team1": team1,
                "team2": team2,
                "winner": winner,
            }))
            .send()
            .await;

        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = res.json().await;
        body["data"].clone()
    }

    pub async fn get_team(&self, user: &User, id: i64) -> Value {
        let res = self
            .get(&format!("/api/teams/{id}"))
            .user(user)
            .send()
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = res.json().await;
        body["data"].clone()
    }

    pub async fn get_player(&self, user: &User, id: i64) -> Value {
        let res = self
            .get(&format!("/api/players/{id}"))
            .user(user)
            .send()
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = res.json().await;
        body["data"].clone()
    }
}
