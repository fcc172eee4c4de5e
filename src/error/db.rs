use sea_orm::{DbErr, SqlErr};

/// Classifies constraint violations independently of the database backend.
pub trait DatabaseError {
    fn unique_violation(&self) -> bool;
    fn foreign_key_violation(&self) -> bool;
}

impl DatabaseError for DbErr {
    fn unique_violation(&self) -> bool {
        matches!(self.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
    }

    fn foreign_key_violation(&self) -> bool {
        matches!(self.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
    }
}
