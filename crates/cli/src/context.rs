//! Application context: the injected client core shared by every command.
//!
//! Built once per invocation from the environment: config, the durable
//! session store, and the API client bound to it. Commands receive the
//! context by reference instead of reaching for globals.

use stylehub_client::api::ApiClient;
use stylehub_client::config::ClientConfig;
use stylehub_client::guard::{self, RouteDecision, ViewAccess};
use stylehub_client::session::storage::FileStorage;
use stylehub_client::session::{AuthenticatedIdentity, Identity, SessionStore};

use crate::commands::CliError;

/// Shared state for all CLI commands.
pub struct AppContext {
    /// The session store backing the durable session file.
    pub session: SessionStore,
    /// The API client, injecting the session token on every request.
    pub client: ApiClient,
}

impl AppContext {
    /// Build the context from environment configuration.
    ///
    /// Opens the session file named by the config and rehydrates the session
    /// from it; a missing or corrupt file starts the session anonymous.
    pub fn from_env() -> Result<Self, CliError> {
        let config = ClientConfig::from_env()?;
        let storage = FileStorage::open(&config.session_file);
        let session = SessionStore::open(storage);
        let client = ApiClient::new(&config, session.clone());

        Ok(Self { session, client })
    }

    /// Evaluate the route guard for a role-restricted view.
    ///
    /// Returns the authenticated identity when the guard allows the view.
    /// On a redirect decision, prints the sign-in prompt and returns `None` -
    /// the same prompt for an anonymous visitor and a wrong-role account.
    pub fn require(&self, required: ViewAccess) -> Option<AuthenticatedIdentity> {
        let identity = self.session.current_identity();
        match (guard::evaluate(identity.role(), required), identity) {
            (RouteDecision::Allow, Identity::Authenticated(auth)) => Some(auth),
            _ => {
                println!("Please sign in to continue: stylehub login");
                None
            }
        }
    }
}
