//! Application context
//!
//! Owns everything a command needs: paths, settings, the session store and
//! the API client. Built once at startup and passed down explicitly.

use std::sync::Arc;

use crate::api::{ApiClient, HttpTransport, Transport};
use crate::config::{AkibaPaths, Settings};
use crate::error::AkibaResult;
use crate::storage::SessionStore;

pub struct AppContext<T: Transport = HttpTransport> {
    pub paths: AkibaPaths,
    pub settings: Settings,
    session: Arc<SessionStore>,
    client: ApiClient<T>,
}

impl AppContext<HttpTransport> {
    /// Load settings, rehydrate the session and connect to the API
    ///
    /// `api_url` (the `--api-url` flag) wins over the environment and the
    /// settings file.
    pub fn init(paths: AkibaPaths, api_url: Option<&str>) -> AkibaResult<Self> {
        paths.ensure_directories()?;
        let settings = Settings::load_or_create(&paths)?.with_overrides(api_url)?;
        let transport = HttpTransport::new(settings.api_base_url.clone())?;

        tracing::debug!(
            base_url = %settings.api_base_url,
            data_dir = %paths.base_dir().display(),
            "context initialized"
        );

        Self::with_transport(paths, settings, transport)
    }
}

impl<T: Transport> AppContext<T> {
    /// Build a context over an arbitrary transport
    pub fn with_transport(paths: AkibaPaths, settings: Settings, transport: T) -> AkibaResult<Self> {
        let session = Arc::new(SessionStore::load(paths.session_file())?);
        let client = ApiClient::new(transport, Arc::clone(&session));

        Ok(Self {
            paths,
            settings,
            session,
            client,
        })
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }
}
