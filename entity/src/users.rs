use super::players;
use sea_orm::entity::prelude::*;
// the active enum derive names `StringLen` unqualified
use sea_orm::sea_query::StringLen;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub mod constraints {
    pub const UC_USERS_USERNAME: &str = "UC_users_username";
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub category: Role,
    pub date_joined: DateTimeUtc,
}

/// Static user roles. Every endpoint declares which of these may call it.
#[derive(
    EnumIter, DeriveActiveEnum, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[sea_orm(string_value = "ADMIN")]
    Admin,
    #[sea_orm(string_value = "ORGANISER")]
    Organiser,
    #[sea_orm(string_value = "CAPTAIN")]
    Captain,
    #[sea_orm(string_value = "PLAYER")]
    Player,
}

impl Role {
    pub const ALL: &'static [Role] = &[Role::Admin, Role::Organiser, Role::Captain, Role::Player];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Organiser => "ORGANISER",
            Role::Captain => "CAPTAIN",
            Role::Player => "PLAYER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole;

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .iter()
            .copied()
            .find(|role| role.as_str() == s)
            .ok_or(UnknownRole)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::players::Entity")]
    Profile,
}

impl Related<players::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Entity {
    #[inline]
    pub fn find_by_username(username: &str) -> Select<Entity> {
        Self::find().filter(Column::Username.eq(username))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_its_own_name() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>(), Ok(*role));
        }
    }

    #[test]
    fn role_names_are_case_sensitive() {
        assert_eq!("admin".parse::<Role>(), Err(UnknownRole));
        assert_eq!("INVALID".parse::<Role>(), Err(UnknownRole));
    }
}
