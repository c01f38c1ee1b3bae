//! Simulated sign-in. No credentials are checked or stored; after a fixed
//! delay the user object is written to local storage.

use crate::db::{Database, USER_KEY};
use crate::errors::{AppError, AppResult};
use crate::models::{SignInPayload, SignUpPayload, StoredUser};
use std::sync::Arc;
use tokio::time::Duration;

const SIGN_IN_NAME: &str = "Demo User";
const SIGN_UP_FALLBACK_NAME: &str = "New User";
const GREETING_FALLBACK_NAME: &str = "User";

#[derive(Debug, Clone)]
pub struct MockAuth {
    db: Arc<Database>,
    delay: Duration,
}

impl MockAuth {
    pub fn new(db: Arc<Database>, delay: Duration) -> Self {
        Self { db, delay }
    }

    pub async fn sign_in(&self, payload: SignInPayload) -> AppResult<StoredUser> {
        require("email", &payload.email)?;
        require("password", &payload.password)?;

        tokio::time::sleep(self.delay).await;
        self.store(StoredUser {
            name: SIGN_IN_NAME.to_string(),
            email: payload.email.trim().to_string(),
            is_logged_in: true,
        })
    }

    pub async fn sign_up(&self, payload: SignUpPayload) -> AppResult<StoredUser> {
        require("email", &payload.email)?;
        require("password", &payload.password)?;

        let name = match payload.name.trim() {
            "" => SIGN_UP_FALLBACK_NAME.to_string(),
            name => name.to_string(),
        };

        tokio::time::sleep(self.delay).await;
        self.store(StoredUser {
            name,
            email: payload.email.trim().to_string(),
            is_logged_in: true,
        })
    }

    /// Returns whether a user was signed in.
    pub fn sign_out(&self) -> AppResult<bool> {
        let removed = self.db.remove_item(USER_KEY)?;
        if removed {
            tracing::info!("user signed out");
        }
        Ok(removed)
    }

    /// The stored user, or `None` when absent or unreadable.
    pub fn current_user(&self) -> AppResult<Option<StoredUser>> {
        let Some(raw) = self.db.get_item(USER_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str::<StoredUser>(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(error) => {
                tracing::warn!(error = %error, "stored user object is malformed");
                Ok(None)
            }
        }
    }

    /// Name shown by the dashboard greeting.
    pub fn display_name(&self) -> AppResult<String> {
        let name = self
            .current_user()?
            .map(|user| user.name)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| GREETING_FALLBACK_NAME.to_string());
        Ok(name)
    }

    fn store(&self, user: StoredUser) -> AppResult<StoredUser> {
        self.db.set_item(USER_KEY, &serde_json::to_string(&user)?)?;
        tracing::info!(email = %user.email, "user signed in");
        Ok(user)
    }
}

fn require(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::MockAuth;
    use crate::db::{Database, USER_KEY};
    use crate::models::{SignInPayload, SignUpPayload};
    use std::sync::Arc;
    use tokio::time::Duration;

    fn auth(dir: &tempfile::TempDir) -> (Arc<Database>, MockAuth) {
        let db = Arc::new(Database::new(&dir.path().join("state.sqlite")).expect("db"));
        (db.clone(), MockAuth::new(db, Duration::ZERO))
    }

    #[tokio::test]
    async fn sign_in_writes_demo_user() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (db, auth) = auth(&dir);

        let user = auth
            .sign_in(SignInPayload {
                email: "demo@example.com".to_string(),
                password: "secret".to_string(),
            })
            .await
            .expect("sign in");
        assert_eq!(user.name, "Demo User");
        assert!(user.is_logged_in);

        let raw = db.get_item(USER_KEY).expect("get").expect("stored");
        let stored: serde_json::Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(
            stored,
            serde_json::json!({ "name": "Demo User", "email": "demo@example.com", "isLoggedIn": true })
        );
        assert!(!raw.contains("secret"));
    }

    #[tokio::test]
    async fn sign_up_keeps_name_or_falls_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (_db, auth) = auth(&dir);

        let named = auth
            .sign_up(SignUpPayload {
                name: "Amal".to_string(),
                email: "amal@example.com".to_string(),
                password: "pw".to_string(),
            })
            .await
            .expect("sign up");
        assert_eq!(named.name, "Amal");
        assert_eq!(auth.display_name().expect("name"), "Amal");

        let unnamed = auth
            .sign_up(SignUpPayload {
                name: "  ".to_string(),
                email: "x@example.com".to_string(),
                password: "pw".to_string(),
            })
            .await
            .expect("sign up");
        assert_eq!(unnamed.name, "New User");
    }

    #[tokio::test]
    async fn missing_email_is_rejected_without_writing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (db, auth) = auth(&dir);

        let error = auth
            .sign_in(SignInPayload {
                email: String::new(),
                password: "pw".to_string(),
            })
            .await
            .expect_err("should fail");
        assert!(error.is_validation());
        assert!(db.get_item(USER_KEY).expect("get").is_none());
    }

    #[test]
    fn greeting_name_defaults_when_absent_or_malformed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (db, auth) = auth(&dir);
        assert_eq!(auth.display_name().expect("name"), "User");

        db.set_item(USER_KEY, "{broken").expect("set");
        assert!(auth.current_user().expect("user").is_none());
        assert_eq!(auth.display_name().expect("name"), "User");
    }

    #[tokio::test]
    async fn sign_out_clears_user() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (_db, auth) = auth(&dir);
        auth.sign_in(SignInPayload {
            email: "demo@example.com".to_string(),
            password: "pw".to_string(),
        })
        .await
        .expect("sign in");

        assert!(auth.sign_out().expect("sign out"));
        assert!(!auth.sign_out().expect("second sign out"));
        assert!(auth.current_user().expect("user").is_none());
    }
}
