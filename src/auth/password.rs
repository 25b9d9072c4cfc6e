use anyhow::Context;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

/// Argon2 is CPU-bound; both entry points run it on tokio's blocking pool.
pub async fn hash_password(plain: &str) -> anyhow::Result<String> {
    let plain = plain.to_owned();
    tokio::task::spawn_blocking(move || hash_sync(&plain))
        .await
        .context("hash task panicked")?
}

pub async fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let (plain, hash) = (plain.to_owned(), hash.to_owned());
    tokio::task::spawn_blocking(move || verify_sync(&plain, &hash))
        .await
        .context("verify task panicked")?
}

fn hash_sync(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| {
            error!(error = %e, "argon2 hash error");
            anyhow::anyhow!(e.to_string())
        })
}

// Digest comparison happens inside argon2's verifier, never by string equality.
fn verify_sync(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "stored hash is not a PHC string");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}
