mod utils;

use utils::prelude::*;

struct League {
    app: App,
    organiser: User,
    teams: [i64; 3],
}

impl League {
    async fn new() -> League {
        let app = App::new().await;
        let organiser = app.organiser().await;

        let mut teams = [0; 3];
        for (id, name) in teams.iter_mut().zip(["Lions", "Tigers", "Bears"]) {
            *id = app.create_team(&organiser, name).await["id"].as_i64().unwrap();
        }

        League {
            app,
            organiser,
            teams,
        }
    }

    async fn team(&self, id: i64) -> Value {
        self.app.get_team(&self.organiser, id).await
    }

    async fn assert_tally(&self, id: i64, played: i64, wins: i64, lost: i64, draw: i64) {
        assert_json_include!(
            actual: self.team(id).await,
            expected: json!({
                "matches_played": played,
                "wins": wins,
                "lost": lost,
                "draw": draw,
                "points": wins * 2 + draw,
            })
        );
    }
}

#[tokio::test]
async fn create_records_a_win() {
    let league = League::new().await;
    let [lions, tigers, _] = league.teams;

    let res = league
        .app
        .post("/api/matches")
        .user(&league.organiser)
        .json(&json!({
            "date": "2025-04-12",
            "venue": "Lord's",
            "team1": lions,
            "team2": tigers,
            "winner": lions,
        }))
        .send()
        .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await;
    assert_json_include!(
        actual: body,
        expected: json!({
            "code": "201",
            "message": "Match created",
            "data": {
                "date": "2025-04-12",
                "venue": "Lord's",
                "team1": lions,
                "team2": tigers,
                "winner": lions,
            },
        })
    );

    league.assert_tally(lions, 1, 1, 0, 0).await;
    league.assert_tally(tigers, 1, 0, 1, 0).await;
}

#[tokio::test]
async fn create_records_a_draw() {
    let league = League::new().await;
    let [lions, tigers, bears] = league.teams;

    league
        .app
        .create_match(&league.organiser, lions, tigers, None)
        .await;

    league.assert_tally(lions, 1, 0, 0, 1).await;
    league.assert_tally(tigers, 1, 0, 0, 1).await;
    league.assert_tally(bears, 0, 0, 0, 0).await;
}

#[tokio::test]
async fn playing_xi_is_credited_with_an_appearance() {
    let league = League::new().await;
    let [lions, tigers, bears] = league.teams;
    let app = &league.app;
    let organiser = &league.organiser;

    let (_, playing) = app.create_player(organiser, lions, true).await;
    let (_, bench) = app.create_player(organiser, lions, false).await;
    let (_, opponent) = app.create_player(organiser, tigers, true).await;
    let (_, bystander) = app.create_player(organiser, bears, true).await;

    app.create_match(organiser, lions, tigers, Some(tigers)).await;

    let played = |player: &Value| player["id"].as_i64().unwrap();
    assert_eq!(app.get_player(organiser, played(&playing)).await["matches_played"], 1);
    assert_eq!(app.get_player(organiser, played(&bench)).await["matches_played"], 0);
    assert_eq!(app.get_player(organiser, played(&opponent)).await["matches_played"], 1);
    assert_eq!(app.get_player(organiser, played(&bystander)).await["matches_played"], 0);
}

#[tokio::test]
async fn create_invalid() {
    let league = League::new().await;
    let [lions, tigers, bears] = league.teams;

    let res = league
        .app
        .post("/api/matches")
        .user(&league.organiser)
        .json(&json!({ "date": "12/04/2025", "venue": "" }))
        .send()
        .await;

    assert_validation!(res, {
        "date": ["Date has wrong format. Use one of these formats instead: YYYY-MM-DD."],
        "venue": ["This field may not be blank."],
        "team1": ["This field is required."],
        "team2": ["This field is required."],
    });

    let res = league
        .app
        .post("/api/matches")
        .user(&league.organiser)
        .json(&json!({
            "date": "2025-04-12",
            "venue": "The Oval",
            "team1": lions,
            "team2": tigers,
            "winner": bears,
        }))
        .send()
        .await;

    assert_validation!(res, {
        "winner": ["Winner must be either team1 or team2."],
    });

    let res = league
        .app
        .post("/api/matches")
        .user(&league.organiser)
        .json(&json!({
            "date": "2025-04-12",
            "venue": "The Oval",
            "team1": lions,
            "team2": 999,
        }))
        .send()
        .await;

    assert_validation!(res, {
        "team2": ["Invalid pk \"999\" - object does not exist."],
    });

    let res = league
        .app
        .post("/api/matches")
        .user(&league.organiser)
        .json(&json!({
            "date": "2025-04-12",
            "venue": "The Oval",
            "team1": lions,
            "team2": lions,
        }))
        .send()
        .await;

    assert_validation!(res, {
        "team2": ["team1 and team2 must be different teams."],
    });

    for team in league.teams {
        league.assert_tally(team, 0, 0, 0, 0).await;
    }
}

#[tokio::test]
async fn only_organisers_manage_matches() {
    let league = League::new().await;
    let captain = league.app.captain().await;

    let res = league.app.get("/api/matches").user(&captain).send().await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: Value = res.json().await;
    assert_eq!(
        body["message"],
        "Permission denied. Your role 'CAPTAIN' is not in ['ADMIN', 'ORGANISER']."
    );
}

#[tokio::test]
async fn update_flips_the_result() {
    let league = League::new().await;
    let [lions, tigers, _] = league.teams;
    let game = league
        .app
        .create_match(&league.organiser, lions, tigers, Some(lions))
        .await;

    let res = league
        .app
        .put(&format!("/api/matches/{}", game["id"]))
        .user(&league.organiser)
        .json(&json!({ "winner": tigers }))
        .send()
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await;
    assert_eq!(body["message"], "Match updated");
    assert_eq!(body["data"]["winner"], tigers);

    league.assert_tally(lions, 1, 0, 1, 0).await;
    league.assert_tally(tigers, 1, 1, 0, 0).await;
}

#[tokio::test]
async fn update_to_a_draw() {
    let league = League::new().await;
    let [lions, tigers, _] = league.teams;
    let game = league
        .app
        .create_match(&league.organiser, lions, tigers, Some(tigers))
        .await;

    let res = league
        .app
        .put(&format!("/api/matches/{}", game["id"]))
        .user(&league.organiser)
        .json(&json!({ "winner": null, "venue": "Headingley" }))
        .send()
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await;
    assert_eq!(body["data"]["winner"], Value::Null);
    assert_eq!(body["data"]["venue"], "Headingley");

    league.assert_tally(lions, 1, 0, 0, 1).await;
    league.assert_tally(tigers, 1, 0, 0, 1).await;
}

#[tokio::test]
async fn update_swaps_a_team() {
    let league = League::new().await;
    let [lions, tigers, bears] = league.teams;
    let game = league
        .app
        .create_match(&league.organiser, lions, tigers, Some(tigers))
        .await;

    let res = league
        .app
        .put(&format!("/api/matches/{}", game["id"]))
        .user(&league.organiser)
        .json(&json!({ "team2": bears, "winner": bears }))
        .send()
        .await;

    assert_eq!(res.status(), StatusCode::OK);

    league.assert_tally(lions, 1, 0, 1, 0).await;
    league.assert_tally(tigers, 0, 0, 0, 0).await;
    league.assert_tally(bears, 1, 1, 0, 0).await;
}

#[tokio::test]
async fn invalid_update_changes_nothing() {
    let league = League::new().await;
    let [lions, tigers, bears] = league.teams;
    let game = league
        .app
        .create_match(&league.organiser, lions, tigers, Some(lions))
        .await;

    // the stored winner is no longer playing once team1 changes
    let res = league
        .app
        .put(&format!("/api/matches/{}", game["id"]))
        .user(&league.organiser)
        .json(&json!({ "team1": bears }))
        .send()
        .await;

    assert_validation!(res, {
        "winner": ["Winner must be either team1 or team2."],
    });

    league.assert_tally(lions, 1, 1, 0, 0).await;
    league.assert_tally(tigers, 1, 0, 1, 0).await;
    league.assert_tally(bears, 0, 0, 0, 0).await;
}

#[tokio::test]
async fn delete_withdraws_the_result() {
    let league = League::new().await;
    let [lions, tigers, _] = league.teams;
    league
        .app
        .create_match(&league.organiser, lions, tigers, Some(lions))
        .await;
    let game = league
        .app
        .create_match(&league.organiser, tigers, lions, None)
        .await;

    let res = league
        .app
        .delete(&format!("/api/matches/{}", game["id"]))
        .user(&league.organiser)
        .send()
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await;
    assert_eq!(body["message"], "Match deleted");

    league.assert_tally(lions, 1, 1, 0, 0).await;
    league.assert_tally(tigers, 1, 0, 1, 0).await;

    let res = league
        .app
        .get(&format!("/api/matches/{}", game["id"]))
        .user(&league.organiser)
        .send()
        .await;
    assert_error!(res, error::MATCH_NOT_FOUND);
}

#[tokio::test]
async fn list() {
    let league = League::new().await;
    let [lions, tigers, bears] = league.teams;
    let first = league
        .app
        .create_match(&league.organiser, lions, tigers, None)
        .await;
    let second = league
        .app
        .create_match(&league.organiser, tigers, bears, Some(bears))
        .await;

    let res = league
        .app
        .get("/api/matches/")
        .user(&league.organiser)
        .send()
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await;
    assert_json_eq!(
        body,
        json!({
            "count": 2,
            "next": null,
            "previous": null,
            "results": [first, second],
        })
    );
}
