//! Core value types used by the dashboard state.
//!
//! Everything that crosses the wire is decoded here, at the boundary, into
//! real Rust types: the `UpToDate` flag becomes a `bool`, phases become a
//! closed [`Phase`] enum and a `null` sub-installation list becomes empty.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of the component repository currently being browsed
/// (e.g. `eu.gcr.io/gardener-project/development`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepositoryContext(String);

impl RepositoryContext {
    /// What: Wrap a raw repository path as a context.
    ///
    /// Inputs:
    /// - `raw`: Registry path; surrounding whitespace is trimmed.
    ///
    /// Output:
    /// - New `RepositoryContext`.
    #[must_use]
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_string())
    }

    /// Raw context string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// What: Split the context into breadcrumb segments.
    ///
    /// Output:
    /// - Non-empty path segments in order, e.g. `["eu.gcr.io", "gardener-project", "development"]`.
    #[must_use]
    pub fn breadcrumbs(&self) -> Vec<&str> {
        self.0.split('/').filter(|s| !s.is_empty()).collect()
    }

    /// Whether the context is blank and therefore unusable for requests.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RepositoryContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A component listed in a repository context.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ComponentSummary {
    /// Component name; identity key within a listing.
    pub name: String,
    /// Resolved version when the server already supplies one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ComponentSummary {
    /// What: Build a summary from a raw server name.
    ///
    /// Details:
    /// - Leading and trailing `/` are stripped; the component server reports
    ///   repository paths with the descriptor prefix cut off, leaving stray
    ///   separators on both ends.
    #[must_use]
    pub fn new(name: &str, version: Option<String>) -> Self {
        Self {
            name: name.trim().trim_matches('/').to_string(),
            version,
        }
    }
}

/// Composite cache key for a component's version list.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VersionKey {
    /// Context the versions were listed under.
    pub context: RepositoryContext,
    /// Component name inside that context.
    pub component: String,
}

/// Lifecycle phase of an installation, execution or deploy item.
///
/// The set is closed; anything the server sends outside of it is kept as
/// [`Phase::Unknown`] so decoding never fails on a new phase.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Phase {
    /// Freshly created, not yet reconciled.
    Init,
    /// Waiting for sibling installations it imports from.
    PendingDependencies,
    /// Reconciliation in progress.
    Progressing,
    /// Being deleted.
    Deleting,
    /// Reconciliation aborted by an operator.
    Aborted,
    /// Reconciled successfully.
    Succeeded,
    /// Reconciliation failed.
    Failed,
    /// Value outside the known set, kept verbatim.
    Unknown(String),
}

impl Phase {
    /// What: Parse a wire phase string.
    ///
    /// Inputs:
    /// - `raw`: Phase as sent by the server.
    ///
    /// Output:
    /// - Matching variant; `Successful` is accepted for `Succeeded`; an empty
    ///   string or anything unrecognized yields `Unknown`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "Init" => Self::Init,
            "PendingDependencies" => Self::PendingDependencies,
            "Progressing" => Self::Progressing,
            "Deleting" => Self::Deleting,
            "Aborted" => Self::Aborted,
            "Succeeded" | "Successful" => Self::Succeeded,
            "Failed" => Self::Failed,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Display label for the phase.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Init => "Init",
            Self::PendingDependencies => "PendingDependencies",
            Self::Progressing => "Progressing",
            Self::Deleting => "Deleting",
            Self::Aborted => "Aborted",
            Self::Succeeded => "Succeeded",
            Self::Failed => "Failed",
            Self::Unknown(raw) if raw.is_empty() => "<unset>",
            Self::Unknown(raw) => raw,
        }
    }
}

impl From<String> for Phase {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<Phase> for String {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Unknown(raw) => raw,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One installation and, recursively, the installations it encompasses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstallationNode {
    /// Object name.
    pub name: String,
    /// Object namespace.
    pub namespace: String,
    /// Whether the observed generation matches the current generation.
    #[serde(default, deserialize_with = "lenient_bool")]
    pub up_to_date: bool,
    /// Own phase as reported by the server; never derived from children.
    #[serde(default = "unset_phase")]
    pub phase: Phase,
    /// Child installations, owned by value.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub subinstallations: Vec<InstallationNode>,
    /// Linked execution, when the server resolved one.
    #[serde(default)]
    pub execution: Option<ExecutionData>,
}

impl InstallationNode {
    /// `Namespace / Name` header text.
    #[must_use]
    pub fn title(&self) -> String {
        format!("{} / {}", self.namespace, self.name)
    }

    /// Whether the node has no sub-installations.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.subinstallations.is_empty()
    }

    /// What: Depth of the subtree rooted at this node.
    ///
    /// Output:
    /// - `1` for a leaf, otherwise one more than the deepest child.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self
            .subinstallations
            .iter()
            .map(Self::depth)
            .max()
            .unwrap_or(0)
    }
}

/// Execution linked to an installation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExecutionData {
    /// Object name.
    pub name: String,
    /// Object namespace.
    pub namespace: String,
    /// Whether the observed generation matches the current generation.
    #[serde(default, deserialize_with = "lenient_bool")]
    pub up_to_date: bool,
    /// Execution phase.
    #[serde(default = "unset_phase")]
    pub phase: Phase,
    /// Deploy items referenced by the execution.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub deploy_items: Vec<DeployItemData>,
}

/// Deploy item referenced by an execution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeployItemData {
    /// Object name.
    pub name: String,
    /// Object namespace.
    pub namespace: String,
    /// Whether the observed generation matches the current generation.
    #[serde(default, deserialize_with = "lenient_bool")]
    pub up_to_date: bool,
    /// Deploy item phase.
    #[serde(default = "unset_phase")]
    pub phase: Phase,
}

/// Filter sent with the installation listing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstallationFilter {
    /// Restrict to a namespace; empty means all namespaces.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    /// Also list encompassed installations; omitted from the body when unset.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub include_subinstallations: bool,
}

/// Missing phase on the wire.
fn unset_phase() -> Phase {
    Phase::Unknown(String::new())
}

/// Accept a JSON bool or the strings `"true"`/`"false"`.
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Bool(b) => Ok(b),
        Raw::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(serde::de::Error::invalid_value(
                serde::de::Unexpected::Str(&s),
                &"a boolean or \"true\"/\"false\"",
            )),
        },
    }
}

/// Treat `null` like an absent list.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: `UpToDate` decodes from both the string and bool transports.
    ///
    /// Inputs:
    /// - One payload with `"true"`, one with `false`.
    ///
    /// Output:
    /// - Real booleans after decoding.
    fn up_to_date_accepts_string_and_bool() {
        let from_str: InstallationNode = serde_json::from_str(
            r#"{"Name":"a","Namespace":"ns","UpToDate":"true","Phase":"Failed","Subinstallations":[]}"#,
        )
        .expect("string flag decodes");
        assert!(from_str.up_to_date);

        let from_bool: InstallationNode = serde_json::from_str(
            r#"{"Name":"a","Namespace":"ns","UpToDate":false,"Phase":"Failed"}"#,
        )
        .expect("bool flag decodes");
        assert!(!from_bool.up_to_date);
    }

    #[test]
    /// What: A garbage `UpToDate` string is rejected instead of silently coerced.
    fn up_to_date_rejects_other_strings() {
        let res = serde_json::from_str::<InstallationNode>(
            r#"{"Name":"a","Namespace":"ns","UpToDate":"yes-ish","Phase":"Failed"}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    /// What: Null sub-installations and execution decode as empty/absent.
    fn null_children_and_execution_are_empty() {
        let node: InstallationNode = serde_json::from_str(
            r#"{"Name":"a","Namespace":"ns","UpToDate":true,"Phase":"Progressing","Subinstallations":null,"Execution":null}"#,
        )
        .expect("nulls decode");
        assert!(node.is_leaf());
        assert!(node.execution.is_none());
        assert_eq!(node.phase, Phase::Progressing);
    }

    #[test]
    /// What: Phase parsing covers the alias and unknown values.
    ///
    /// Inputs:
    /// - `Successful`, `Failed`, `Exploded`.
    ///
    /// Output:
    /// - `Succeeded`, `Failed`, `Unknown("Exploded")`.
    fn phase_parse_alias_and_unknown() {
        assert_eq!(Phase::parse("Successful"), Phase::Succeeded);
        assert_eq!(Phase::parse("Failed"), Phase::Failed);
        assert_eq!(
            Phase::parse("Exploded"),
            Phase::Unknown("Exploded".to_string())
        );
        assert_eq!(Phase::parse("").label(), "<unset>");
    }

    #[test]
    /// What: Breadcrumbs skip empty segments.
    fn breadcrumbs_split_on_slash() {
        let ctx = RepositoryContext::new("eu.gcr.io/gardener-project//development/");
        assert_eq!(
            ctx.breadcrumbs(),
            vec!["eu.gcr.io", "gardener-project", "development"]
        );
    }

    #[test]
    /// What: Component names lose stray separators from the server listing.
    fn component_name_is_trimmed() {
        let c = ComponentSummary::new("/github.com/gardener/landscaper/", None);
        assert_eq!(c.name, "github.com/gardener/landscaper");
    }

    #[test]
    /// What: Subtree depth counts levels.
    fn depth_counts_levels() {
        let node: InstallationNode = serde_json::from_str(
            r#"{"Name":"r","Namespace":"ns","Phase":"Failed","Subinstallations":[
                {"Name":"c","Namespace":"ns","Phase":"Failed","Subinstallations":[
                    {"Name":"g","Namespace":"ns","Phase":"Failed"}]}]}"#,
        )
        .expect("tree decodes");
        assert_eq!(node.depth(), 3);
    }
}
