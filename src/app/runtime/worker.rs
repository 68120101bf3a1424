//! API worker: serves dashboard requests from the HTTP client or the demo
//! fixtures and sends each answer back as soon as it completes.

use tokio::sync::mpsc;

use crate::sources::{self, ApiClient};
use crate::state::{ApiRequest, ApiResponse};

/// Where the API worker gets its answers.
#[derive(Clone, Debug)]
pub enum ApiSource {
    /// Live dashboard server.
    Http(ApiClient),
    /// Built-in fixtures.
    Demo,
}

impl ApiSource {
    /// Label shown in the title bar.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Http(client) => client.base_url().to_string(),
            Self::Demo => "demo".to_string(),
        }
    }

    /// What: Answer one request.
    ///
    /// Inputs:
    /// - `req`: Request from the event loop.
    ///
    /// Output:
    /// - Response echoing the request's identifying fields.
    pub async fn serve(&self, req: ApiRequest) -> ApiResponse {
        match req {
            ApiRequest::ListComponents { context, seq } => {
                let result = match self {
                    Self::Http(client) => client.list_components(&context).await,
                    Self::Demo => sources::demo::list_components(&context),
                };
                ApiResponse::Components {
                    context,
                    seq,
                    result,
                }
            }
            ApiRequest::ListComponentVersions { ticket } => {
                let result = match self {
                    Self::Http(client) => {
                        client
                            .list_component_versions(&ticket.key.context, &ticket.key.component)
                            .await
                    }
                    Self::Demo => sources::demo::list_component_versions(
                        &ticket.key.context,
                        &ticket.key.component,
                    ),
                };
                ApiResponse::Versions { ticket, result }
            }
            ApiRequest::ListInstallations { filter, seq } => {
                let result = match self {
                    Self::Http(client) => client.list_installations(&filter).await,
                    Self::Demo => sources::demo::list_installations(&filter),
                };
                ApiResponse::Installations { seq, result }
            }
        }
    }
}

/// What: Spawn the background worker serving API requests.
///
/// Inputs:
/// - `source`: Where answers come from.
/// - `req_rx`: Channel receiver for requests from the event loop.
/// - `res_tx`: Channel sender for responses.
///
/// Details:
/// - Each request runs in its own task so a slow lookup never delays another
///   key; responses are sent in completion order.
/// - The worker exits when the request channel closes.
pub fn spawn_api_worker(
    source: ApiSource,
    mut req_rx: mpsc::UnboundedReceiver<ApiRequest>,
    res_tx: mpsc::UnboundedSender<ApiResponse>,
) {
    tokio::spawn(async move {
        while let Some(req) = req_rx.recv().await {
            let source = source.clone();
            let res_tx = res_tx.clone();
            tokio::spawn(async move {
                let res = source.serve(req).await;
                if res_tx.send(res).is_err() {
                    tracing::debug!("event loop gone; dropping API response");
                }
            });
        }
        tracing::debug!("API worker stopped");
    });
}
