use crate::config::HashingCost;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use once_cell::sync::{Lazy, OnceCell};
use std::{collections::HashSet, sync::Arc};

pub const MIN_LENGTH: usize = 8;

/// Ratio above which a password counts as a variation of the username.
const MAX_SIMILARITY: f64 = 0.7;

/// Argon2id hashing with the configured cost.
#[derive(Clone)]
pub struct Passwords {
    argon2: Argon2<'static>,
    /// Hash of a throwaway password, created with the same parameters on first use.
    dummy: Arc<OnceCell<String>>,
}

impl Passwords {
    pub fn new(cost: HashingCost) -> Result<Self, argon2::Error> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            dummy: Arc::default(),
        })
    }

    pub fn hash(&self, password: &str) -> Result<String, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);

        Ok(self
            .argon2
            .hash_password(password.as_bytes(), &salt)?
            .to_string())
    }

    /// Malformed hashes never verify.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            warn!("stored password hash could not be parsed");
            return false;
        };

        self.argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// Does the work of `verify` for an account that does not exist, so a
    /// failed login takes as long for unknown usernames as for known ones.
    /// Never succeeds.
    pub fn verify_missing(&self, password: &str) -> bool {
        match self.dummy.get_or_try_init(|| self.hash(DUMMY_PASSWORD)) {
            Ok(hash) => {
                self.verify(password, hash);
            }
            Err(error) => error!("failed to hash the dummy password: {error}"),
        }

        false
    }
}

const DUMMY_PASSWORD: &str = "no account has this password";

static COMMON_PASSWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "password", "password1", "password12", "password123", "passw0rd", "p@ssw0rd",
        "12345678", "123456789", "1234567890", "87654321", "11111111", "00000000",
        "qwertyui", "qwertyuiop", "qwerty123", "1q2w3e4r", "1qaz2wsx", "zaq12wsx",
        "asdfghjk", "asdfasdf", "iloveyou", "sunshine", "princess", "football",
        "baseball", "basketball", "superman", "batman123", "starwars", "whatever",
        "trustno1", "letmein1", "welcome1", "welcome123", "abc12345", "abcd1234",
        "admin123", "administrator", "changeme", "computer", "internet", "michelle",
        "jennifer", "jordan23", "liverpool", "chelsea1", "arsenal1", "dragon12",
        "master12", "monkey12", "shadow12", "mustang1", "charlie1", "q1w2e3r4",
        "1234qwer", "qwer1234", "aaaaaaaa", "zxcvbnm1", "zxcvbnmm", "google123",
        "cricket1", "cricket123", "sachin10", "india123", "pakistan", "12341234",
        "11223344", "123123123", "987654321", "66666666", "88888888", "a1b2c3d4",
    ]
    .into_iter()
    .collect()
});

/// Checks a new password against the strength rules and returns every failed rule.
pub fn policy_violations(password: &str, username: &str) -> Vec<&'static str> {
    let mut violations = Vec::new();

    if is_too_similar(password, username) {
        violations.push("The password is too similar to the username.");
    }

    if password.chars().count() < MIN_LENGTH {
        violations.push("This password is too short. It must contain at least 8 characters.");
    }

    if COMMON_PASSWORDS.contains(password.trim().to_lowercase().as_str()) {
        violations.push("This password is too common.");
    }

    if !password.is_empty() && password.chars().all(|c| c.is_ascii_digit()) {
        violations.push("This password is entirely numeric.");
    }

    violations
}

fn is_too_similar(password: &str, username: &str) -> bool {
    let password = password.to_lowercase();
    let username = username.to_lowercase();

    if username.is_empty() || password.is_empty() {
        return false;
    }

    if password.contains(&username) || (username.len() >= 3 && username.contains(&password)) {
        return true;
    }

    similarity(&password, &username) >= MAX_SIMILARITY
}

/// `2 * lcs / (len(a) + len(b))`, in `0.0..=1.0`.
fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut previous = vec![0usize; b.len() + 1];
    let mut current = vec![0usize; b.len() + 1];

    for x in &a {
        for (j, y) in b.iter().enumerate() {
            current[j + 1] = if x == y {
                previous[j] + 1
            } else {
                current[j].max(previous[j + 1])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }

    let lcs = previous[b.len()];

    (2 * lcs) as f64 / (a.len() + b.len()) as f64
}
