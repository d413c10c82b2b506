//! Admin account management commands.

use rand::{Rng, distr::Alphanumeric};
use sqlx::PgPool;
use thiserror::Error;

use fieldops_core::{Email, EmailError, Role};

const GENERATED_PASSWORD_LENGTH: usize = 20;

/// Errors from admin account commands.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Create an admin account.
///
/// When no password is given, a random one is generated and printed to
/// stdout once; it is stored only as a bcrypt hash.
///
/// # Errors
///
/// Returns `AdminError` if the email is invalid, the database is
/// unreachable, or the insert fails (e.g. duplicate email).
pub async fn create_user(
    email: &str,
    name: &str,
    password: Option<&str>,
) -> Result<(), AdminError> {
    dotenvy::dotenv().ok();

    let email = Email::parse(email)?;

    let database_url = std::env::var("FIELDOPS_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| AdminError::MissingEnvVar("FIELDOPS_DATABASE_URL"))?;

    let (password, generated) = match password {
        Some(p) => (p.to_owned(), false),
        None => (generate_password(), true),
    };

    let password_hash = bcrypt::hash(&password, bcrypt::DEFAULT_COST)?;

    let pool = PgPool::connect(&database_url).await?;

    sqlx::query(
        r"
        INSERT INTO app_user (full_name, email, password_hash, role)
        VALUES ($1, $2, $3, $4)
        ",
    )
    .bind(name)
    .bind(email.as_str())
    .bind(&password_hash)
    .bind(Role::Admin)
    .execute(&pool)
    .await?;

    tracing::info!("Admin account created: {}", email);

    if generated {
        #[allow(clippy::print_stdout)]
        {
            println!("Generated password: {password}");
            println!("Store it securely; it is not recoverable from the database.");
        }
    }

    Ok(())
}

fn generate_password() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(GENERATED_PASSWORD_LENGTH)
        .map(char::from)
        .collect()
}
