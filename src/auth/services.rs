use tracing::{info, warn};

use crate::{
    auth::{
        dto::{AuthResponse, Credentials},
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        repo::UserStore,
        repo_types::User,
    },
    error::AppError,
};

fn issue(keys: &JwtKeys, user: User) -> Result<AuthResponse, AppError> {
    let token = keys.sign(user.id).map_err(AppError::Internal)?;
    Ok(AuthResponse {
        id: user.id,
        email: user.email,
        token,
    })
}

pub async fn register(
    users: &dyn UserStore,
    keys: &JwtKeys,
    creds: Credentials,
) -> Result<AuthResponse, AppError> {
    // Emails are stored and matched exactly as sent.
    let email = creds.email;

    if users
        .find_by_email(&email)
        .await
        .map_err(AppError::Store)?
        .is_some()
    {
        warn!(%email, "email already registered");
        return Err(AppError::Conflict);
    }

    let hash = hash_password(&creds.password)
        .await
        .map_err(AppError::Internal)?;

    // A concurrent signup can still win between the lookup and the insert.
    let user = users
        .create(&email, &hash)
        .await
        .map_err(AppError::Store)?
        .ok_or(AppError::Conflict)?;

    info!(user_id = user.id, email = %user.email, "user registered");
    issue(keys, user)
}

pub async fn login(
    users: &dyn UserStore,
    keys: &JwtKeys,
    creds: Credentials,
) -> Result<AuthResponse, AppError> {
    let email = creds.email;

    let Some(user) = users.find_by_email(&email).await.map_err(AppError::Store)? else {
        warn!(%email, "login unknown email");
        return Err(AppError::Unauthorized("Invalid credentials"));
    };

    let ok = verify_password(&creds.password, &user.hash)
        .await
        .map_err(AppError::Internal)?;
    if !ok {
        warn!(%email, user_id = user.id, "login invalid password");
        return Err(AppError::Unauthorized("Invalid credentials"));
    }

    info!(user_id = user.id, email = %user.email, "user logged in");
    issue(keys, user)
}

/// Resolves a bearer credential to the user id it was issued for.
pub fn verify_token(keys: &JwtKeys, token: &str) -> Result<i32, AppError> {
    keys.verify(token).map(|claims| claims.sub).map_err(|e| {
        warn!(error = %e, "invalid or expired token");
        AppError::Unauthorized("Invalid or expired token")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{auth::repo::MemoryUserStore, config::JwtConfig};

    fn keys() -> JwtKeys {
        JwtKeys::from(&JwtConfig {
            secret: "test-secret".into(),
            issuer: "test-issuer".into(),
            audience: "test-aud".into(),
            ttl_minutes: 5,
        })
    }

    fn creds(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn register_then_login_yields_same_identity() {
        let store = MemoryUserStore::default();
        let keys = keys();

        let registered = register(&store, &keys, creds("a@x.com", "pw1")).await.unwrap();
        assert_eq!(registered.id, 1);
        assert_eq!(verify_token(&keys, &registered.token).unwrap(), registered.id);

        let logged_in = login(&store, &keys, creds("a@x.com", "pw1")).await.unwrap();
        assert_eq!(logged_in.id, registered.id);
        assert_eq!(verify_token(&keys, &logged_in.token).unwrap(), registered.id);
    }

    #[tokio::test]
    async fn register_stores_a_hash_not_the_password() {
        let store = MemoryUserStore::default();
        register(&store, &keys(), creds("a@x.com", "pw1")).await.unwrap();
        let user = store.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_ne!(user.hash, "pw1");
        assert!(user.hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let store = MemoryUserStore::default();
        let keys = keys();
        register(&store, &keys, creds("a@x.com", "pw1")).await.unwrap();
        let err = register(&store, &keys, creds("a@x.com", "other")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict));
    }

    #[tokio::test]
    async fn emails_are_kept_exactly_as_sent() {
        let store = MemoryUserStore::default();
        let keys = keys();

        let admin = register(&store, &keys, creds("Admin@Localhost", "pw1")).await.unwrap();
        assert_eq!(admin.email, "Admin@Localhost");

        // A differently-cased address is a distinct account.
        let other = register(&store, &keys, creds("admin@localhost", "pw1")).await.unwrap();
        assert_ne!(other.id, admin.id);

        let err = login(&store, &keys, creds("ADMIN@LOCALHOST", "pw1")).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
        let ok = login(&store, &keys, creds("Admin@Localhost", "pw1")).await.unwrap();
        assert_eq!(ok.id, admin.id);
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let store = MemoryUserStore::default();
        let keys = keys();
        register(&store, &keys, creds("a@x.com", "pw1")).await.unwrap();
        for attempt in ["pw2", "", "PW1", "pw1 "] {
            let err = login(&store, &keys, creds("a@x.com", attempt)).await.unwrap_err();
            assert!(matches!(err, AppError::Unauthorized(_)), "attempt {attempt:?}");
        }
    }

    #[tokio::test]
    async fn unknown_email_is_unauthorized() {
        let store = MemoryUserStore::default();
        let err = login(&store, &keys(), creds("nobody@x.com", "pw1")).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn register_applies_no_content_rules() {
        let store = MemoryUserStore::default();
        let keys = keys();
        let bare = register(&store, &keys, creds("bogus", "")).await.unwrap();
        assert_eq!(bare.email, "bogus");
        assert!(login(&store, &keys, creds("bogus", "")).await.is_ok());
    }

    #[test]
    fn verify_token_rejects_tampering() {
        let keys = keys();
        let mut token = keys.sign(3).unwrap();
        token.push('x');
        assert!(matches!(
            verify_token(&keys, &token),
            Err(AppError::Unauthorized(_))
        ));
    }
}
