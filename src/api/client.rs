// ============================================================================
// ApiClient : point unique d'envoi des requêtes
// ============================================================================
// Pipeline d'une requête :
//
//   ApiRequest ──> middlewares.on_request (dans l'ordre)
//              ──> Transport::send
//              ──> statut 2xx ? décodage JSON : ApiError::Server
//   en cas d'échec : middlewares.on_error (dans l'ordre) puis Err(error)
//
// Contrat : chaque appel se termine soit par le payload décodé, soit par
// l'erreur d'origine, après que chaque middleware a vu l'échec une seule
// fois. Pas de retry, pas de circuit breaker.
// ============================================================================

use std::sync::Arc;

use anyhow::Result;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::config::ClientConfig;
use super::error::ApiError;
use super::middleware::{BearerAuth, ErrorNotifier, Middleware};
use super::notify::Notifier;
use super::storage::KeyValueStorage;
use super::transport::{ApiRequest, ReqwestTransport, Transport};

/// Client HTTP de l'API comptable
///
/// CONCEPT RUST : Arc<dyn Trait>
/// - Le client peut être partagé entre stores (Arc<ApiClient>)
/// - Transport et middlewares sont des trait objects interchangeables
pub struct ApiClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    middlewares: Vec<Arc<dyn Middleware>>,
}

impl ApiClient {
    /// Client nu, sans middleware
    pub fn new(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            transport,
            middlewares: Vec::new(),
        }
    }

    /// Client de production : reqwest + jeton d'accès + notifications
    pub fn standard(
        config: ClientConfig,
        storage: Arc<dyn KeyValueStorage>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let transport = Arc::new(ReqwestTransport::new(&config)?);

        Ok(Self::new(config, transport)
            .with_middleware(Arc::new(BearerAuth::new(storage)))
            .with_middleware(Arc::new(ErrorNotifier::new(notifier))))
    }

    /// Ajoute un middleware en fin de liste (builder)
    pub fn with_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.middlewares.push(middleware);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Envoie une requête et décode la réponse JSON
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn send<T: DeserializeOwned>(&self, mut request: ApiRequest) -> Result<T, ApiError> {
        match self.execute(&mut request).await {
            Ok(payload) => Ok(payload),
            Err(mut error) => {
                for middleware in &self.middlewares {
                    middleware.on_error(&request, &mut error);
                }
                Err(error)
            }
        }
    }

    async fn execute<T: DeserializeOwned>(&self, request: &mut ApiRequest) -> Result<T, ApiError> {
        for middleware in &self.middlewares {
            middleware.on_request(request)?;
        }

        let url = self.config.url_for(&request.path);
        debug!(url = %url, "Sending HTTP request");

        let response = self.transport.send(&url, request).await?;

        if !response.is_success() {
            return Err(ApiError::from_response(response.status, response.body));
        }

        serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use super::ApiClient;
    use crate::api::config::ClientConfig;
    use crate::api::middleware::{BearerAuth, ErrorNotifier};
    use crate::api::notify::CollectingNotifier;
    use crate::api::storage::MemoryStorage;
    use crate::api::transport::fake::FakeTransport;

    /// Client complet branché sur un transport scripté
    pub(crate) struct TestClient {
        pub client: Arc<ApiClient>,
        pub transport: Arc<FakeTransport>,
        pub notifier: Arc<CollectingNotifier>,
        pub storage: Arc<MemoryStorage>,
    }

    pub(crate) fn test_client() -> TestClient {
        let transport = FakeTransport::new();
        let notifier = Arc::new(CollectingNotifier::new());
        let storage = Arc::new(MemoryStorage::new());

        let client = ApiClient::new(ClientConfig::default(), transport.clone())
            .with_middleware(Arc::new(BearerAuth::new(storage.clone())))
            .with_middleware(Arc::new(ErrorNotifier::new(notifier.clone())));

        TestClient {
            client: Arc::new(client),
            transport,
            notifier,
            storage,
        }
    }
}
