// ============================================================================
// Transport : envoi brut des requêtes HTTP
// ============================================================================
// Le client (ApiClient) construit une ApiRequest, applique les middlewares,
// puis délègue l'envoi réel à un Transport.
//
// CONCEPT RUST : Trait objects + async-trait
// - Arc<dyn Transport> : le client ne connaît pas l'implémentation
// - ReqwestTransport en production, un transport scripté dans les tests
// - #[async_trait] permet d'écrire "async fn" dans un trait
// ============================================================================

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use super::config::ClientConfig;
use super::error::ApiError;

/// Requête sortante, modifiable par les middlewares
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,

    /// Chemin relatif à la base de l'API (ex: "/transactions")
    pub path: String,

    pub query: Vec<(String, String)>,

    pub headers: HeaderMap,

    /// Corps JSON
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Ajoute un paramètre de query string (builder)
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Sérialise le corps en JSON
    pub fn json<T: serde::Serialize>(mut self, body: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Request(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Valeur d'un en-tête, si elle est du texte valide
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

/// Réponse brute : statut + corps texte
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Envoi d'une requête déjà préparée
///
/// Ne renvoie Err(ApiError::Transport) que si aucune réponse n'a été reçue ;
/// les statuts 4xx/5xx sont des réponses normales à ce niveau.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, url: &str, request: &ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// Transport de production basé sur reqwest
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Crée le client reqwest avec le timeout de la configuration
    pub fn new(config: &ClientConfig) -> anyhow::Result<Self> {
        use anyhow::Context;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("lazyledger/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Échec de la création du client HTTP")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, url: &str, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let mut builder = self
            .client
            .request(request.method.clone(), url)
            .headers(request.headers.clone())
            .query(&request.query);

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        debug!(status, "Received HTTP response");

        // Un corps illisible équivaut à une réponse perdue
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(ApiResponse { status, body })
    }
}

// ============================================================================
// Transport scripté pour les tests
// ============================================================================
