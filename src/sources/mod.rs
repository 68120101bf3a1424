//! Remote data retrieval for the dashboard API.
//!
//! All three operations are JSON `POST`s against the dashboard server. The
//! transport lives in [`ApiClient`]; decoding is split into pure functions so
//! it can be exercised without a server.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::state::{ComponentSummary, InstallationFilter, InstallationNode, RepositoryContext};

pub mod demo;

/// Failure of a remote lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The request never completed (connect error, timeout, reset).
    #[error("network error: {0}")]
    Network(String),
    /// The server answered with a non-success status.
    #[error("server error {status}: {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Message from the response body, if any.
        message: String,
    },
    /// The body could not be decoded into the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}

/// Body of `listComponents`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListComponentsRequest<'a> {
    /// Context to list.
    repository_context: &'a str,
}

/// Body of `listComponentVersions`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListComponentVersionsRequest<'a> {
    /// Context the component lives in.
    repository_context: &'a str,
    /// Component to list tags for.
    component_name: &'a str,
}

/// A listed component: either a bare name or an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ComponentEntry {
    /// `"name"`
    Name(String),
    /// `{ "name": .., "version": .. }`
    Summary {
        /// Component name.
        name: String,
        /// Optional resolved version.
        #[serde(default)]
        version: Option<String>,
    },
}

/// Answer of `listComponents`.
#[derive(Debug, Deserialize)]
struct ListComponentsResponse {
    /// `null` is treated like an empty listing.
    #[serde(default)]
    components: Option<Vec<ComponentEntry>>,
}

/// Answer of `listComponentVersions`.
#[derive(Debug, Deserialize)]
struct ListComponentVersionsResponse {
    /// `null` is treated like no versions.
    #[serde(default)]
    versions: Option<Vec<String>>,
}

/// What: Turn a status code and body into a typed payload or a [`FetchError`].
///
/// Inputs:
/// - `status`: HTTP status code.
/// - `body`: Raw response body.
///
/// Output:
/// - Decoded payload on 2xx; `Server` error with the body message otherwise;
///   `Decode` when a 2xx body does not match `T`.
///
/// Details:
/// - Error bodies are usually a JSON string (`"a repository context has to be set"`);
///   plain text and empty bodies are accepted as well.
///
/// # Errors
/// - See output.
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, FetchError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<String>(body)
            .unwrap_or_else(|_| body.trim().to_string());
        return Err(FetchError::Server { status, message });
    }
    serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))
}

/// What: Decode a `listComponents` answer.
///
/// # Errors
/// - Propagates [`decode_response`] failures.
pub fn decode_components(status: u16, body: &str) -> Result<Vec<ComponentSummary>, FetchError> {
    let res: ListComponentsResponse = decode_response(status, body)?;
    Ok(res
        .components
        .unwrap_or_default()
        .into_iter()
        .map(|entry| match entry {
            ComponentEntry::Name(name) => ComponentSummary::new(&name, None),
            ComponentEntry::Summary { name, version } => ComponentSummary::new(&name, version),
        })
        .filter(|c| !c.name.is_empty())
        .collect())
}

/// What: Decode a `listComponentVersions` answer.
///
/// # Errors
/// - Propagates [`decode_response`] failures.
pub fn decode_versions(status: u16, body: &str) -> Result<Vec<String>, FetchError> {
    let res: ListComponentVersionsResponse = decode_response(status, body)?;
    Ok(res.versions.unwrap_or_default())
}

/// What: Decode a `listInstallationData` answer.
///
/// Details:
/// - The server answers `null` for an empty forest.
///
/// # Errors
/// - Propagates [`decode_response`] failures.
pub fn decode_installations(status: u16, body: &str) -> Result<Vec<InstallationNode>, FetchError> {
    let forest: Option<Vec<InstallationNode>> = decode_response(status, body)?;
    Ok(forest.unwrap_or_default())
}

/// HTTP client bound to one dashboard server.
#[derive(Clone, Debug)]
pub struct ApiClient {
    /// Pooled reqwest client.
    http: reqwest::Client,
    /// Server base URL without trailing slash.
    base_url: String,
}

impl ApiClient {
    /// What: Build a client for `base_url` with the given request timeout.
    ///
    /// # Errors
    /// - Returns `Network` when the underlying client cannot be constructed.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .user_agent(format!("landscaper-dashboard/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Network(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Server base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// What: POST `body` to `/{path}` and return status and raw body text.
    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(u16, String), FetchError> {
        let url = format!("{}/{path}", self.base_url);
        tracing::debug!(%url, "POST");
        let resp = self.http.post(&url).json(body).send().await?;
        let status = resp.status().as_u16();
        let text = resp.text().await?;
        Ok((status, text))
    }

    /// What: List the components of a repository context.
    ///
    /// # Errors
    /// - `Network`, `Server` or `Decode` per [`FetchError`].
    pub async fn list_components(
        &self,
        context: &RepositoryContext,
    ) -> Result<Vec<ComponentSummary>, FetchError> {
        let body = ListComponentsRequest {
            repository_context: context.as_str(),
        };
        let (status, text) = self.post("listComponents", &body).await?;
        decode_components(status, &text)
    }

    /// What: List the versions (tags) of one component.
    ///
    /// # Errors
    /// - `Network`, `Server` or `Decode` per [`FetchError`].
    pub async fn list_component_versions(
        &self,
        context: &RepositoryContext,
        component: &str,
    ) -> Result<Vec<String>, FetchError> {
        let body = ListComponentVersionsRequest {
            repository_context: context.as_str(),
            component_name: component,
        };
        let (status, text) = self.post("listComponentVersions", &body).await?;
        decode_versions(status, &text)
    }

    /// What: Fetch the installation forest.
    ///
    /// # Errors
    /// - `Network`, `Server` or `Decode` per [`FetchError`].
    pub async fn list_installations(
        &self,
        filter: &InstallationFilter,
    ) -> Result<Vec<InstallationNode>, FetchError> {
        let (status, text) = self.post("listInstallationData", filter).await?;
        decode_installations(status, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Phase;

    #[test]
    /// What: Both component listing shapes decode to summaries.
    ///
    /// Inputs:
    /// - Bare-string listing as sent by the server, object listing with a version.
    ///
    /// Output:
    /// - Normalized names, version carried when present.
    fn components_accept_names_and_objects() {
        let bare = decode_components(
            200,
            r#"{"repositoryContext":"eu.gcr.io/x","components":["/github.com/a/","github.com/b"]}"#,
        )
        .expect("bare listing");
        assert_eq!(
            bare,
            vec![
                ComponentSummary::new("github.com/a", None),
                ComponentSummary::new("github.com/b", None)
            ]
        );

        let objects = decode_components(
            200,
            r#"{"components":[{"name":"my-component"},{"name":"other","version":"1.2.3"}]}"#,
        )
        .expect("object listing");
        assert_eq!(objects[0].name, "my-component");
        assert_eq!(objects[1].version.as_deref(), Some("1.2.3"));
    }

    #[test]
    /// What: Non-2xx bodies become `Server` errors carrying the message.
    fn server_error_keeps_message() {
        let err = decode_versions(400, r#""a component name has to be set""#)
            .expect_err("400 is an error");
        assert_eq!(
            err,
            FetchError::Server {
                status: 400,
                message: "a component name has to be set".to_string()
            }
        );
        let empty = decode_versions(500, "").expect_err("500 is an error");
        assert!(matches!(empty, FetchError::Server { status: 500, .. }));
    }

    #[test]
    /// What: A 2xx body of the wrong shape is a decode error.
    fn wrong_shape_is_decode_error() {
        let err = decode_versions(200, r#"{"versions":"0.0.1"}"#).expect_err("bad shape");
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    /// What: Version order is preserved and `null` means none.
    fn versions_keep_order() {
        assert_eq!(
            decode_versions(200, r#"{"versions":["0.0.1","0.0.2"]}"#).expect("versions"),
            vec!["0.0.1".to_string(), "0.0.2".to_string()]
        );
        assert!(decode_versions(200, r#"{"versions":null}"#).expect("null").is_empty());
    }

    #[test]
    /// What: Installation forests decode with nested data; `null` is an empty forest.
    fn installations_decode() {
        let forest = decode_installations(
            200,
            r#"[{"Name":"inst-0","Namespace":"ns","UpToDate":true,"Phase":"Succeeded",
                "Subinstallations":null,
                "Execution":{"Name":"exec","Namespace":"ns","UpToDate":false,"Phase":"Progressing",
                    "DeployItems":[{"Name":"di","Namespace":"ns","UpToDate":true,"Phase":"Succeeded"}]}}]"#,
        )
        .expect("forest");
        assert_eq!(forest.len(), 1);
        let exec = forest[0].execution.as_ref().expect("execution present");
        assert_eq!(exec.phase, Phase::Progressing);
        assert_eq!(exec.deploy_items.len(), 1);
        assert!(decode_installations(200, "null").expect("null").is_empty());
    }

    #[test]
    /// What: The installation filter serializes with the server's field names.
    fn filter_serializes_pascal_case() {
        let all = serde_json::to_string(&InstallationFilter::default()).expect("json");
        assert_eq!(all, "{}");
        let ns = serde_json::to_string(&InstallationFilter {
            namespace: "garden".to_string(),
            include_subinstallations: true,
        })
        .expect("json");
        assert_eq!(ns, r#"{"Namespace":"garden","IncludeSubinstallations":true}"#);
    }
}
