//! Portal credentials kept in the OS keyring.

use crate::errors::{AppError, AppResult};

pub const SERVICE_NAME: &str = "magnit-vms-hour-logging-cli";
const USERNAME_KEY: &str = "username";
const PASSWORD_KEY: &str = "password";

#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn validate(&self) -> AppResult<()> {
        if self.username.trim().is_empty() {
            return Err(AppError::InvalidInput("username is required".into()));
        }
        if self.password.is_empty() {
            return Err(AppError::InvalidInput("password is required".into()));
        }
        Ok(())
    }
}

/// Username and password stored as two entries under one keyring service.
pub struct CredentialStore {
    service_name: String,
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new(SERVICE_NAME)
    }
}

impl CredentialStore {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
        }
    }

    fn entry(&self, key: &str) -> AppResult<keyring::Entry> {
        keyring::Entry::new(&self.service_name, key).map_err(|e| AppError::Keyring(e.to_string()))
    }

    pub fn save(&self, creds: &Credentials) -> AppResult<()> {
        creds.validate()?;

        self.entry(USERNAME_KEY)?
            .set_password(&creds.username)
            .map_err(|e| AppError::Keyring(format!("save username: {e}")))?;
        self.entry(PASSWORD_KEY)?
            .set_password(&creds.password)
            .map_err(|e| AppError::Keyring(format!("save password: {e}")))?;
        Ok(())
    }

    pub fn load(&self) -> AppResult<Credentials> {
        let username = self.read(USERNAME_KEY)?;
        let password = self.read(PASSWORD_KEY)?;
        Ok(Credentials { username, password })
    }

    /// Remove both entries. Entries that are already gone are not an error.
    pub fn delete(&self) -> AppResult<()> {
        for key in [USERNAME_KEY, PASSWORD_KEY] {
            match self.entry(key)?.delete_credential() {
                Ok(()) | Err(keyring::Error::NoEntry) => {}
                Err(e) => return Err(AppError::Keyring(format!("delete {key}: {e}"))),
            }
        }
        Ok(())
    }

    fn read(&self, key: &str) -> AppResult<String> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(value),
            Err(keyring::Error::NoEntry) => Err(AppError::CredentialsNotFound),
            Err(e) => Err(AppError::Keyring(format!("read {key}: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.into(),
            password: password.into(),
        }
    }

    #[test]
    fn save_rejects_incomplete_credentials_before_touching_keyring() {
        let store = CredentialStore::new("hours-test-service-never-written");
        assert!(matches!(
            store.save(&creds(" ", "pw")),
            Err(AppError::InvalidInput(ref m)) if m.contains("username")
        ));
        assert!(matches!(
            store.save(&creds("me@example.com", "")),
            Err(AppError::InvalidInput(ref m)) if m.contains("password")
        ));
    }

    #[test]
    fn debug_output_hides_password() {
        let rendered = format!("{:?}", creds("me@example.com", "hunter2"));
        assert!(rendered.contains("me@example.com"));
        assert!(!rendered.contains("hunter2"));
    }
}
