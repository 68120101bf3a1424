//! Built-in fixtures answering the dashboard API without a server (`--demo`).
//!
//! The installation payload uses the string transport for `UpToDate` and the
//! `Successful` phase spelling on purpose, so offline runs go through the same
//! boundary decoding as real responses.

use crate::state::{ComponentSummary, InstallationFilter, InstallationNode, RepositoryContext};

use super::{FetchError, decode_installations};

/// Reference installation forest.
const INSTALLATIONS_JSON: &str = r#"[
  {
    "Name": "inst-0",
    "Namespace": "dummy-ns",
    "UpToDate": "true",
    "Phase": "Failed",
    "Subinstallations": [
      {
        "Name": "subinst-0-0",
        "Namespace": "dummy-ns",
        "UpToDate": "true",
        "Phase": "Successful",
        "Subinstallations": [
          {
            "Name": "subinst-1-0",
            "Namespace": "dummy-ns",
            "UpToDate": "true",
            "Phase": "Successful",
            "Subinstallations": []
          }
        ]
      },
      {
        "Name": "subinst-0-1",
        "Namespace": "dummy-ns",
        "UpToDate": "true",
        "Phase": "Failed",
        "Subinstallations": []
      }
    ],
    "Execution": null
  },
  {
    "Name": "inst-1",
    "Namespace": "dummy-ns",
    "UpToDate": "true",
    "Phase": "Successful",
    "Subinstallations": [],
    "Execution": {
      "Name": "inst-1",
      "Namespace": "dummy-ns",
      "UpToDate": "true",
      "Phase": "Succeeded",
      "DeployItems": [
        {"Name": "inst-1-helm", "Namespace": "dummy-ns", "UpToDate": "true", "Phase": "Succeeded"},
        {"Name": "inst-1-manifest", "Namespace": "dummy-ns", "UpToDate": "false", "Phase": "Progressing"}
      ]
    }
  },
  {
    "Name": "inst-2",
    "Namespace": "dummy-ns",
    "UpToDate": "true",
    "Phase": "Progressing",
    "Subinstallations": [],
    "Execution": null
  }
]"#;

/// Component offered in every demo context.
const DEMO_COMPONENT: &str = "my-component";

/// What: Demo component listing.
///
/// # Errors
/// - `Server` 400 for an empty context, mirroring the real endpoint.
pub fn list_components(context: &RepositoryContext) -> Result<Vec<ComponentSummary>, FetchError> {
    if context.is_empty() {
        return Err(FetchError::Server {
            status: 400,
            message: "a repository context has to be set".to_string(),
        });
    }
    Ok(vec![ComponentSummary::new(DEMO_COMPONENT, None)])
}

/// What: Demo version listing.
///
/// # Errors
/// - `Server` 400 for an empty context or component name.
pub fn list_component_versions(
    context: &RepositoryContext,
    component: &str,
) -> Result<Vec<String>, FetchError> {
    if context.is_empty() {
        return Err(FetchError::Server {
            status: 400,
            message: "a repository context has to be set".to_string(),
        });
    }
    if component.is_empty() {
        return Err(FetchError::Server {
            status: 400,
            message: "a component name has to be set".to_string(),
        });
    }
    if component == DEMO_COMPONENT {
        Ok(vec!["0.0.1".to_string(), "0.0.2".to_string()])
    } else {
        Ok(Vec::new())
    }
}

/// What: Demo installation forest, narrowed by the filter's namespace.
///
/// # Errors
/// - `Decode` if the embedded fixture is malformed.
pub fn list_installations(filter: &InstallationFilter) -> Result<Vec<InstallationNode>, FetchError> {
    let mut forest = decode_installations(200, INSTALLATIONS_JSON)?;
    if !filter.namespace.is_empty() {
        forest.retain(|n| n.namespace == filter.namespace);
    }
    Ok(forest)
}
