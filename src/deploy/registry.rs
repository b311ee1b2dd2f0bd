// ABOUTME: Container registry credentials attached to every deployed app.
// ABOUTME: The password travels as a secret whose name is derived from server and username.

use super::error::PlanError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Registry login as given on the command line or in the settings file.
/// Any field may be missing until the sources are merged.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RegistryLogin {
    #[serde(default)]
    pub server: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl fmt::Debug for RegistryLogin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryLogin")
            .field("server", &self.server)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl RegistryLogin {
    /// Fill every field left unset here from `fallback`.
    pub fn or(self, fallback: RegistryLogin) -> Self {
        RegistryLogin {
            server: self.server.or(fallback.server),
            username: self.username.or(fallback.username),
            password: self.password.or(fallback.password),
        }
    }

    /// Check the login is complete. No server and no credentials means no registry.
    pub fn resolve(self) -> Result<Option<Registry>, PlanError> {
        match (self.server, self.username, self.password) {
            (None, None, None) => Ok(None),
            (None, _, _) => Err(PlanError::RegistryWithoutServer),
            (Some(server), Some(username), Some(password)) => {
                let password_secret_ref = password_secret_ref(&server, &username);
                tracing::debug!(%server, %username, secret = %password_secret_ref, "using registry credentials");
                Ok(Some(Registry {
                    server,
                    username,
                    password_secret_ref,
                    password,
                }))
            }
            (Some(server), _, _) => Err(PlanError::IncompleteRegistry(server)),
        }
    }
}

/// Credentials for pulling images from a private registry.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Registry {
    pub server: String,
    pub username: String,
    /// Name of the app secret holding the password.
    pub password_secret_ref: String,
    #[serde(skip)]
    password: String,
}

impl Registry {
    /// Value to store under [`Registry::password_secret_ref`].
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("server", &self.server)
            .field("username", &self.username)
            .field("password_secret_ref", &self.password_secret_ref)
            .finish_non_exhaustive()
    }
}

/// Secret name for a registry password: the server with every
/// non-alphanumeric character removed, a dash, then the username.
pub fn password_secret_ref(server: &str, username: &str) -> String {
    let server: String = server.chars().filter(char::is_ascii_alphanumeric).collect();
    format!("{}-{}", server, username)
}
