//! Team tallies and player appearance counts derived from match results.
//!
//! Every function expects to run inside the transaction that writes the match
//! itself. The team rows involved are locked while their tallies are
//! rewritten, so concurrent results for the same team serialize.

use entity::{matches, players, teams};
use sea_orm::{
    sea_query::Expr, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use std::collections::BTreeMap;

/// The part of a match the tallies depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fixture {
    pub team1: i32,
    pub team2: i32,
    /// `None` is a draw.
    pub winner: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

impl Fixture {
    #[inline]
    pub const fn teams(&self) -> [i32; 2] {
        [self.team1, self.team2]
    }

    #[inline]
    pub fn involves(&self, team: i32) -> bool {
        self.team1 == team || self.team2 == team
    }

    pub fn outcome(&self, team: i32) -> Outcome {
        match self.winner {
            None => Outcome::Draw,
            Some(winner) if winner == team => Outcome::Win,
            Some(_) => Outcome::Loss,
        }
    }
}

impl From<&matches::Model> for Fixture {
    fn from(model: &matches::Model) -> Self {
        Self {
            team1: model.team1,
            team2: model.team2,
            winner: model.winner,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub matches_played: i32,
    pub wins: i32,
    pub lost: i32,
    pub draw: i32,
    pub points: i32,
}

impl Tally {
    fn credit(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.lost += 1,
            Outcome::Draw => self.draw += 1,
        }
    }

    /// Counters never go below zero.
    fn debit(&mut self, outcome: Outcome) {
        let counter = match outcome {
            Outcome::Win => &mut self.wins,
            Outcome::Loss => &mut self.lost,
            Outcome::Draw => &mut self.draw,
        };

        *counter = (*counter - 1).max(0);
    }

    fn appear(&mut self) {
        self.matches_played += 1;
    }

    fn disappear(&mut self) {
        self.matches_played = (self.matches_played - 1).max(0);
    }

    fn refresh_points(&mut self) {
        self.points = self.wins * 2 + self.draw;
    }
}

impl From<&teams::Model> for Tally {
    fn from(team: &teams::Model) -> Self {
        Self {
            matches_played: team.matches_played,
            wins: team.wins,
            lost: team.lost,
            draw: team.draw,
            points: team.points,
        }
    }
}

/// Tallies of the teams touched by one match write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Standings {
    tallies: BTreeMap<i32, Tally>,
}

impl FromIterator<(i32, Tally)> for Standings {
    fn from_iter<I: IntoIterator<Item = (i32, Tally)>>(iter: I) -> Self {
        Self {
            tallies: iter.into_iter().collect(),
        }
    }
}

impl Standings {
    /// Loads and locks the given teams. Unknown ids are skipped.
    pub async fn load<C, I>(db: &C, team_ids: I) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
        I: IntoIterator<Item = i32>,
    {
        let teams = teams::Entity::find()
            .filter(teams::Column::Id.is_in(team_ids))
            .order_by_asc(teams::Column::Id)
            .lock_exclusive()
            .all(db)
            .await?;

        Ok(teams.iter().map(|team| (team.id, Tally::from(team))).collect())
    }

    pub fn get(&self, team: i32) -> Option<&Tally> {
        self.tallies.get(&team)
    }

    /// A new result: both teams appear once more and the outcome is credited.
    pub fn record(&mut self, fixture: &Fixture) {
        for team in fixture.teams() {
            self.update(team, |tally| {
                tally.appear();
                tally.credit(fixture.outcome(team));
            });
        }
    }

    /// Takes a result back completely, appearance included.
    pub fn withdraw(&mut self, fixture: &Fixture) {
        for team in fixture.teams() {
            self.update(team, |tally| {
                tally.disappear();
                tally.debit(fixture.outcome(team));
            });
        }
    }

    /// Replaces a stored result. Teams present in both fixtures keep their
    /// appearance; a team swapped out loses it and a team swapped in gains one.
    pub fn revise(&mut self, old: &Fixture, new: &Fixture) {
        for team in old.teams() {
            self.update(team, |tally| {
                tally.debit(old.outcome(team));
                if !new.involves(team) {
                    tally.disappear();
                }
            });
        }

        for team in new.teams() {
            self.update(team, |tally| {
                tally.credit(new.outcome(team));
                if !old.involves(team) {
                    tally.appear();
                }
            });
        }
    }

    fn update(&mut self, team: i32, f: impl FnOnce(&mut Tally)) {
        if let Some(tally) = self.tallies.get_mut(&team) {
            f(tally);
            tally.refresh_points();
        }
    }

    pub async fn save<C: ConnectionTrait>(self, db: &C) -> Result<(), DbErr> {
        for (id, tally) in self.tallies {
            let team = teams::ActiveModel {
                id: ActiveValue::Unchanged(id),
                matches_played: Set(tally.matches_played),
                wins: Set(tally.wins),
                lost: Set(tally.lost),
                draw: Set(tally.draw),
                points: Set(tally.points),
                ..Default::default()
            };

            teams::Entity::update(team).exec(db).await?;
        }

        Ok(())
    }
}

/// Applies a newly created match: tallies of both teams, and one appearance
/// for everyone currently in either playing XI.
pub async fn record_match<C: ConnectionTrait>(db: &C, fixture: &Fixture) -> Result<(), DbErr> {
    let mut standings = Standings::load(db, fixture.teams()).await?;
    standings.record(fixture);
    standings.save(db).await?;

    credit_playing_xi(db, fixture).await
}

/// Applies an edited match. Player appearances are left alone.
pub async fn revise_match<C: ConnectionTrait>(
    db: &C,
    old: &Fixture,
    new: &Fixture,
) -> Result<(), DbErr> {
    let teams = old.teams().into_iter().chain(new.teams());
    let mut standings = Standings::load(db, teams).await?;
    standings.revise(old, new);
    standings.save(db).await
}

/// Applies a deleted match.
pub async fn withdraw_match<C: ConnectionTrait>(db: &C, fixture: &Fixture) -> Result<(), DbErr> {
    let mut standings = Standings::load(db, fixture.teams()).await?;
    standings.withdraw(fixture);
    standings.save(db).await
}

async fn credit_playing_xi<C: ConnectionTrait>(db: &C, fixture: &Fixture) -> Result<(), DbErr> {
    let result = players::Entity::update_many()
        .col_expr(
            players::Column::MatchesPlayed,
            Expr::col(players::Column::MatchesPlayed).add(1),
        )
        .filter(players::Column::Team.is_in(fixture.teams()))
        .filter(players::Column::IsPlaying.eq(true))
        .exec(db)
        .await?;

    debug!(
        "credited an appearance to {} players of teams {} and {}",
        result.rows_affected, fixture.team1, fixture.team2
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(team1: i32, team2: i32, winner: Option<i32>) -> Fixture {
        Fixture {
            team1,
            team2,
            winner,
        }
    }

    fn standings(teams: &[i32]) -> Standings {
        teams.iter().map(|id| (*id, Tally::default())).collect()
    }

    fn tally(matches_played: i32, wins: i32, lost: i32, draw: i32) -> Tally {
        Tally {
            matches_played,
            wins,
            lost,
            draw,
            points: wins * 2 + draw,
        }
    }

    #[test]
    fn outcome_from_either_side() {
        let fixture = fixture(1, 2, Some(2));

        assert_eq!(fixture.outcome(1), Outcome::Loss);
        assert_eq!(fixture.outcome(2), Outcome::Win);
        assert_eq!(self::fixture(1, 2, None).outcome(1), Outcome::Draw);
    }

    #[test]
    fn record_win() {
        let mut standings = standings(&[1, 2]);
        standings.record(&fixture(1, 2, Some(1)));

        assert_eq!(standings.get(1), Some(&tally(1, 1, 0, 0)));
        assert_eq!(standings.get(2), Some(&tally(1, 0, 1, 0)));
    }

    #[test]
    fn record_draw() {
        let mut standings = standings(&[1, 2]);
        standings.record(&fixture(1, 2, None));

        assert_eq!(standings.get(1), Some(&tally(1, 0, 0, 1)));
        assert_eq!(standings.get(2), Some(&tally(1, 0, 0, 1)));
        assert_eq!(standings.get(1).unwrap().points, 1);
    }

    #[test]
    fn revise_result_between_same_teams() {
        let mut standings = standings(&[1, 2]);
        let old = fixture(1, 2, Some(1));
        let new = fixture(1, 2, Some(2));

        standings.record(&old);
        standings.revise(&old, &new);

        assert_eq!(standings.get(1), Some(&tally(1, 0, 1, 0)));
        assert_eq!(standings.get(2), Some(&tally(1, 1, 0, 0)));
    }

    #[test]
    fn revise_swaps_a_team() {
        let mut standings = standings(&[1, 2, 3]);
        let old = fixture(1, 2, Some(2));
        let new = fixture(1, 3, None);

        standings.record(&old);
        standings.revise(&old, &new);

        assert_eq!(standings.get(1), Some(&tally(1, 0, 0, 1)));
        assert_eq!(standings.get(2), Some(&tally(0, 0, 0, 0)));
        assert_eq!(standings.get(3), Some(&tally(1, 0, 0, 1)));
    }

    #[test]
    fn withdraw_undoes_record() {
        let mut standings = standings(&[1, 2]);
        let fixture = fixture(1, 2, Some(1));

        standings.record(&fixture);
        standings.withdraw(&fixture);

        assert_eq!(standings, self::standings(&[1, 2]));
    }

    #[test]
    fn counters_saturate_at_zero() {
        let mut standings = standings(&[1, 2]);
        standings.withdraw(&fixture(1, 2, Some(1)));

        assert_eq!(standings.get(1), Some(&Tally::default()));
        assert_eq!(standings.get(2), Some(&Tally::default()));
    }

    #[test]
    fn unknown_teams_are_ignored() {
        let mut standings = standings(&[1]);
        standings.record(&fixture(1, 9, Some(9)));

        assert_eq!(standings.get(1), Some(&tally(1, 0, 1, 0)));
        assert_eq!(standings.get(9), None);
    }
}
