//! Installation status tree: the loaded forest, per-node status glyphs, the
//! recursive panel rendering and the local expansion state.

use std::collections::{HashMap, HashSet};

use tokio::sync::mpsc;

use crate::logic::lazy_cache::Completion;
use crate::sources::FetchError;
use crate::state::messages::ApiRequest;
use crate::state::types::{
    DeployItemData, ExecutionData, InstallationFilter, InstallationNode, Phase,
};

/// Status glyph of a node header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhaseGlyph {
    /// Phase `Succeeded`.
    Success,
    /// Phase `Failed`.
    Error,
    /// Everything else, including unknown phases.
    Other,
}

impl PhaseGlyph {
    /// Single-cell symbol for the terminal.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Success => "✔",
            Self::Error => "✖",
            Self::Other => "↻",
        }
    }
}

/// What: Map a phase to its glyph.
///
/// Details:
/// - Pure and total: only `Succeeded` and `Failed` get dedicated glyphs.
#[must_use]
pub const fn phase_glyph(phase: &Phase) -> PhaseGlyph {
    match phase {
        Phase::Succeeded => PhaseGlyph::Success,
        Phase::Failed => PhaseGlyph::Error,
        Phase::Init
        | Phase::PendingDependencies
        | Phase::Progressing
        | Phase::Deleting
        | Phase::Aborted
        | Phase::Unknown(_) => PhaseGlyph::Other,
    }
}

/// Glyph counts over the descendants of a node (the node itself excluded).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusSummary {
    /// Descendants that succeeded.
    pub succeeded: usize,
    /// Descendants that failed.
    pub failed: usize,
    /// Descendants in any other phase.
    pub other: usize,
}

impl StatusSummary {
    /// What: Count the glyphs of every descendant of `node`.
    #[must_use]
    pub fn of_descendants(node: &InstallationNode) -> Self {
        let mut out = Self::default();
        let mut stack: Vec<&InstallationNode> = node.subinstallations.iter().collect();
        while let Some(n) = stack.pop() {
            out.count(phase_glyph(&n.phase));
            stack.extend(n.subinstallations.iter());
        }
        out
    }

    /// Count one node with `glyph`.
    const fn count(&mut self, glyph: PhaseGlyph) {
        match glyph {
            PhaseGlyph::Success => self.succeeded += 1,
            PhaseGlyph::Error => self.failed += 1,
            PhaseGlyph::Other => self.other += 1,
        }
    }

    /// Add the counts of `other`.
    const fn merge(&mut self, other: Self) {
        self.succeeded += other.succeeded;
        self.failed += other.failed;
        self.other += other.other;
    }

    /// Total descendants counted.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.succeeded + self.failed + self.other
    }
}

/// One `label: value` line of a node's detail body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailLine {
    /// Field label.
    pub label: &'static str,
    /// Rendered value.
    pub value: String,
}

impl DetailLine {
    /// Build a line.
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// Fully expanded rendering of one node and its subtree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedNode {
    /// `Namespace / Name`.
    pub header: String,
    /// Status glyph of the node's own phase.
    pub glyph: PhaseGlyph,
    /// `Name`, `Namespace`, `UpToDate`, `Phase`.
    pub details: Vec<DetailLine>,
    /// Nested panels, one per sub-installation, in order.
    pub children: Vec<RenderedNode>,
    /// Execution summary, `none` when absent.
    pub execution: String,
    /// Deploy items of the execution.
    pub deploy_items: Vec<DeployItemLine>,
}

impl RenderedNode {
    /// What: Number of nested panel levels including this one.
    #[must_use]
    pub fn levels(&self) -> usize {
        1 + self.children.iter().map(Self::levels).max().unwrap_or(0)
    }
}

/// Detail lines shared by the full render and the terminal rows.
fn detail_lines(node: &InstallationNode) -> Vec<DetailLine> {
    vec![
        DetailLine::new("Name", node.name.clone()),
        DetailLine::new("Namespace", node.namespace.clone()),
        DetailLine::new("UpToDate", node.up_to_date.to_string()),
        DetailLine::new("Phase", node.phase.label()),
    ]
}

/// What: One-line execution summary.
///
/// Output:
/// - `none` when absent, otherwise `namespace / name (phase, up to date|outdated, N deploy items)`.
#[must_use]
pub fn execution_summary(execution: Option<&ExecutionData>) -> String {
    execution.map_or_else(
        || "none".to_string(),
        |e| {
            format!(
                "{} / {} ({}, {}, {} deploy item{})",
                e.namespace,
                e.name,
                e.phase,
                if e.up_to_date { "up to date" } else { "outdated" },
                e.deploy_items.len(),
                if e.deploy_items.len() == 1 { "" } else { "s" }
            )
        },
    )
}

/// One deploy item listed under an execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeployItemLine {
    /// Status glyph of the item's phase.
    pub glyph: PhaseGlyph,
    /// `Namespace / Name`.
    pub title: String,
    /// Phase label.
    pub phase: String,
}

impl DeployItemLine {
    /// Line for one decoded deploy item.
    fn of(item: &DeployItemData) -> Self {
        Self {
            glyph: phase_glyph(&item.phase),
            title: format!("{} / {}", item.namespace, item.name),
            phase: item.phase.label().to_string(),
        }
    }
}

/// Deploy items of an execution in server order; empty when there is no execution.
#[must_use]
pub fn deploy_item_lines(execution: Option<&ExecutionData>) -> Vec<DeployItemLine> {
    execution.map_or_else(Vec::new, |e| e.deploy_items.iter().map(DeployItemLine::of).collect())
}

/// What: Render a node with every nested panel expanded.
///
/// Inputs:
/// - `node`: Subtree root.
///
/// Output:
/// - Header, glyph, detail lines, recursively rendered children and execution.
///
/// Details:
/// - A leaf yields no children. Recursion depth equals the data depth.
#[must_use]
pub fn render_node(node: &InstallationNode) -> RenderedNode {
    RenderedNode {
        header: node.title(),
        glyph: phase_glyph(&node.phase),
        details: detail_lines(node),
        children: node.subinstallations.iter().map(render_node).collect(),
        execution: execution_summary(node.execution.as_ref()),
        deploy_items: deploy_item_lines(node.execution.as_ref()),
    }
}

/// Index path from a root of the forest down to a node.
pub type NodePath = Vec<usize>;

/// What: Descendant counts for every node of `forest`, keyed by path.
///
/// Details:
/// - One post-order pass; each node is visited once.
fn summarize_forest(forest: &[InstallationNode]) -> HashMap<NodePath, StatusSummary> {
    fn visit(
        node: &InstallationNode,
        path: &mut NodePath,
        out: &mut HashMap<NodePath, StatusSummary>,
    ) -> StatusSummary {
        let mut below = StatusSummary::default();
        for (i, child) in node.subinstallations.iter().enumerate() {
            path.push(i);
            below.merge(visit(child, path, out));
            path.pop();
            below.count(phase_glyph(&child.phase));
        }
        out.insert(path.clone(), below);
        below
    }

    let mut out = HashMap::new();
    let mut path = Vec::new();
    for (i, root) in forest.iter().enumerate() {
        path.push(i);
        visit(root, &mut path, &mut out);
        path.pop();
    }
    out
}

/// Kind of a flattened tree row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RowKind {
    /// Panel header of a node.
    Header {
        /// Status glyph.
        glyph: PhaseGlyph,
        /// `Namespace / Name`.
        title: String,
        /// Panel is open.
        expanded: bool,
        /// Descendant glyph counts.
        summary: StatusSummary,
    },
    /// A `label: value` line inside an open panel.
    Detail(DetailLine),
    /// The `Subinstallations:` caption inside an open panel.
    SubinstallationsCaption {
        /// Number of children.
        count: usize,
    },
    /// The `Execution:` line of an open panel.
    Execution(String),
    /// One deploy item below the execution line.
    DeployItem(DeployItemLine),
}

/// One visible row for the terminal renderer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeRow {
    /// Nesting level (0 for roots).
    pub depth: usize,
    /// Path of the node the row belongs to.
    pub path: NodePath,
    /// What to draw.
    pub kind: RowKind,
}

impl TreeRow {
    /// Whether the row is a selectable panel header.
    #[must_use]
    pub const fn is_header(&self) -> bool {
        matches!(self.kind, RowKind::Header { .. })
    }
}

/// Load progress of the forest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeLoad {
    /// Nothing requested yet.
    Idle,
    /// Request outstanding.
    Loading,
    /// Forest resident.
    Loaded,
    /// Last load failed; current data kept.
    Failed(String),
}

/// State of the installation overview page.
#[derive(Debug)]
pub struct InstallationTree {
    /// Resident forest.
    forest: Vec<InstallationNode>,
    /// Load progress.
    load: TreeLoad,
    /// Sequence number of the newest load request.
    load_seq: u64,
    /// Filter sent with loads.
    filter: InstallationFilter,
    /// Descendant counts per node, rebuilt whenever the forest is replaced.
    summaries: HashMap<NodePath, StatusSummary>,
    /// Open panels.
    expanded: HashSet<NodePath>,
    /// Highlighted header path.
    selected: Option<NodePath>,
}

impl InstallationTree {
    /// What: Create an empty tree that will load with `filter`.
    #[must_use]
    pub fn new(filter: InstallationFilter) -> Self {
        Self {
            forest: Vec::new(),
            load: TreeLoad::Idle,
            load_seq: 0,
            filter,
            summaries: HashMap::new(),
            expanded: HashSet::new(),
            selected: None,
        }
    }

    /// What: Create a tree seeded with placeholder data shown until the first load lands.
    #[must_use]
    pub fn with_placeholder(filter: InstallationFilter, forest: Vec<InstallationNode>) -> Self {
        let mut tree = Self::new(filter);
        tree.replace_forest(forest);
        tree
    }

    /// Resident forest.
    #[must_use]
    pub fn forest(&self) -> &[InstallationNode] {
        &self.forest
    }

    /// Load progress.
    #[must_use]
    pub const fn load_state(&self) -> &TreeLoad {
        &self.load
    }

    /// Filter sent with loads.
    #[must_use]
    pub const fn filter(&self) -> &InstallationFilter {
        &self.filter
    }

    /// Highlighted header path.
    #[must_use]
    pub fn selected(&self) -> Option<&[usize]> {
        self.selected.as_deref()
    }

    /// What: Request the forest.
    ///
    /// Output:
    /// - `true` when a request was queued; `false` while one is already outstanding
    ///   or the worker is gone.
    pub fn load_installations(&mut self, tx: &mpsc::UnboundedSender<ApiRequest>) -> bool {
        if self.load == TreeLoad::Loading {
            return false;
        }
        self.load_seq = self.load_seq.wrapping_add(1);
        let req = ApiRequest::ListInstallations {
            filter: self.filter.clone(),
            seq: self.load_seq,
        };
        tracing::debug!(seq = self.load_seq, namespace = %self.filter.namespace, "requesting installations");
        if tx.send(req).is_ok() {
            self.load = TreeLoad::Loading;
            true
        } else {
            tracing::warn!("API worker unavailable; installation load dropped");
            self.load = TreeLoad::Failed("API worker unavailable".to_string());
            false
        }
    }

    /// What: Apply a load answer.
    ///
    /// Details:
    /// - Success replaces the forest in full and resets expansion, since index
    ///   paths of the old forest do not carry over.
    /// - Failure keeps the resident forest.
    pub fn handle_installations_result(
        &mut self,
        seq: u64,
        result: Result<Vec<InstallationNode>, FetchError>,
    ) -> Completion {
        if seq != self.load_seq {
            tracing::debug!(seq, current = self.load_seq, "discarding stale installation load");
            return Completion::Stale;
        }
        match result {
            Ok(forest) => {
                tracing::info!(roots = forest.len(), "installations loaded");
                self.replace_forest(forest);
                self.load = TreeLoad::Loaded;
                Completion::Applied
            }
            Err(e) => {
                tracing::warn!(error = %e, "installation load failed");
                self.load = TreeLoad::Failed(e.to_string());
                Completion::Failed
            }
        }
    }

    /// Swap in a new forest with fresh counts, nothing open and the first root selected.
    fn replace_forest(&mut self, forest: Vec<InstallationNode>) {
        self.summaries = summarize_forest(&forest);
        self.expanded.clear();
        self.selected = (!forest.is_empty()).then(|| vec![0]);
        self.forest = forest;
    }

    /// Descendant counts of the node at `path`.
    #[must_use]
    pub fn summary(&self, path: &[usize]) -> StatusSummary {
        self.summaries.get(path).copied().unwrap_or_default()
    }

    /// What: Resolve a path to its node.
    #[must_use]
    pub fn node_at(&self, path: &[usize]) -> Option<&InstallationNode> {
        let (first, rest) = path.split_first()?;
        let mut node = self.forest.get(*first)?;
        for idx in rest {
            node = node.subinstallations.get(*idx)?;
        }
        Some(node)
    }

    /// Whether a panel is open.
    #[must_use]
    pub fn is_expanded(&self, path: &[usize]) -> bool {
        self.expanded.contains(path)
    }

    /// What: Open or close a panel. Purely local; never fetches.
    ///
    /// Output:
    /// - `true` when the panel is open afterwards; `false` if closed or the path is invalid.
    pub fn toggle(&mut self, path: &[usize]) -> bool {
        if self.node_at(path).is_none() {
            return false;
        }
        if self.expanded.remove(path) {
            false
        } else {
            self.expanded.insert(path.to_vec());
            true
        }
    }

    /// Toggle the highlighted panel.
    pub fn toggle_selected(&mut self) {
        if let Some(path) = self.selected.clone() {
            self.toggle(&path);
        }
    }

    /// What: Close the highlighted panel, or move to its parent when already closed.
    pub fn collapse_selected(&mut self) {
        let Some(path) = self.selected.clone() else {
            return;
        };
        if !self.expanded.remove(&path) && path.len() > 1 {
            self.selected = Some(path[..path.len() - 1].to_vec());
        }
    }

    /// What: Move the highlight across visible headers.
    pub fn move_selection(&mut self, delta: isize) {
        let headers: Vec<NodePath> = self
            .visible_rows()
            .into_iter()
            .filter(TreeRow::is_header)
            .map(|r| r.path)
            .collect();
        if headers.is_empty() {
            self.selected = None;
            return;
        }
        let current = self
            .selected
            .as_ref()
            .and_then(|p| headers.iter().position(|h| h == p))
            .unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(headers.len() - 1);
        self.selected = headers.get(next).cloned();
    }

    /// What: Flatten the forest under the current expansion into drawable rows.
    ///
    /// Details:
    /// - An open panel shows its detail lines, the sub-installation caption,
    ///   one nested header per child, the execution line and its deploy items,
    ///   in that order.
    /// - Header counts come from the table built when the forest was loaded.
    #[must_use]
    pub fn visible_rows(&self) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        let mut path = Vec::new();
        for (i, node) in self.forest.iter().enumerate() {
            path.push(i);
            self.push_rows(node, &mut path, &mut rows);
            path.pop();
        }
        rows
    }

    /// Recursive helper of [`Self::visible_rows`].
    fn push_rows(&self, node: &InstallationNode, path: &mut NodePath, rows: &mut Vec<TreeRow>) {
        let depth = path.len() - 1;
        let expanded = self.expanded.contains(path.as_slice());
        rows.push(TreeRow {
            depth,
            path: path.clone(),
            kind: RowKind::Header {
                glyph: phase_glyph(&node.phase),
                title: node.title(),
                expanded,
                summary: self.summary(path.as_slice()),
            },
        });
        if !expanded {
            return;
        }
        for line in detail_lines(node) {
            rows.push(TreeRow {
                depth,
                path: path.clone(),
                kind: RowKind::Detail(line),
            });
        }
        rows.push(TreeRow {
            depth,
            path: path.clone(),
            kind: RowKind::SubinstallationsCaption {
                count: node.subinstallations.len(),
            },
        });
        for (i, child) in node.subinstallations.iter().enumerate() {
            path.push(i);
            self.push_rows(child, path, rows);
            path.pop();
        }
        rows.push(TreeRow {
            depth,
            path: path.clone(),
            kind: RowKind::Execution(execution_summary(node.execution.as_ref())),
        });
        for item in deploy_item_lines(node.execution.as_ref()) {
            rows.push(TreeRow {
                depth,
                path: path.clone(),
                kind: RowKind::DeployItem(item),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str, phase: &str, children: Vec<InstallationNode>) -> InstallationNode {
        InstallationNode {
            name: name.to_string(),
            namespace: "dummy-ns".to_string(),
            up_to_date: true,
            phase: Phase::parse(phase),
            subinstallations: children,
            execution: None,
        }
    }

    #[test]
    /// What: Glyph mapping is total over known and unknown phases.
    ///
    /// Inputs:
    /// - Every known phase plus two unknown strings.
    ///
    /// Output:
    /// - Success/Error only for `Succeeded`/`Failed`, `Other` otherwise.
    fn glyph_mapping_is_total() {
        for raw in ["Init", "PendingDependencies", "Progressing", "Deleting", "Aborted", "", "Weird"] {
            assert_eq!(phase_glyph(&Phase::parse(raw)), PhaseGlyph::Other, "phase {raw}");
        }
        assert_eq!(phase_glyph(&Phase::Succeeded), PhaseGlyph::Success);
        assert_eq!(phase_glyph(&Phase::parse("Successful")), PhaseGlyph::Success);
        assert_eq!(phase_glyph(&Phase::Failed), PhaseGlyph::Error);
    }

    #[test]
    /// What: A leaf renders without nested panels and with `none` execution.
    fn leaf_has_no_children() {
        let r = render_node(&node("leaf", "Progressing", vec![]));
        assert!(r.children.is_empty());
        assert_eq!(r.levels(), 1);
        assert_eq!(r.execution, "none");
        assert_eq!(r.header, "dummy-ns / leaf");
        let labels: Vec<&str> = r.details.iter().map(|d| d.label).collect();
        assert_eq!(labels, vec!["Name", "Namespace", "UpToDate", "Phase"]);
    }

    #[test]
    /// What: Parent glyph reflects only its own phase.
    fn parent_phase_is_not_aggregated() {
        let tree = node("p", "Succeeded", vec![node("c", "Failed", vec![])]);
        let r = render_node(&tree);
        assert_eq!(r.glyph, PhaseGlyph::Success);
        assert_eq!(r.children[0].glyph, PhaseGlyph::Error);
        let s = StatusSummary::of_descendants(&tree);
        assert_eq!(s, StatusSummary { succeeded: 0, failed: 1, other: 0 });
    }

    #[test]
    /// What: Toggling one panel leaves siblings untouched and never fetches.
    fn toggle_is_local_and_isolated() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tree = InstallationTree::new(InstallationFilter::default());
        assert!(tree.load_installations(&tx));
        assert!(!tree.load_installations(&tx), "second load while loading");
        tree.handle_installations_result(
            1,
            Ok(vec![node("a", "Failed", vec![node("a0", "Succeeded", vec![])]), node("b", "Failed", vec![])]),
        );
        let _ = rx.try_recv();
        assert!(tree.toggle(&[0]));
        assert!(tree.toggle(&[1]));
        assert!(!tree.toggle(&[1]));
        assert!(tree.is_expanded(&[0]));
        assert!(!tree.toggle(&[7]), "invalid path");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    /// What: Visible rows follow expansion order.
    fn visible_rows_follow_expansion() {
        let mut tree = InstallationTree::with_placeholder(
            InstallationFilter::default(),
            vec![node("a", "Failed", vec![node("a0", "Succeeded", vec![])])],
        );
        assert_eq!(tree.visible_rows().len(), 1);
        tree.toggle(&[0]);
        let rows = tree.visible_rows();
        // header, 4 details, caption, child header, execution
        assert_eq!(rows.len(), 8);
        assert!(rows[6].is_header());
        assert_eq!(rows[6].depth, 1);
        assert_eq!(rows[7].kind, RowKind::Execution("none".to_string()));
    }

    #[test]
    /// What: Header counts are computed once per load and match a full subtree walk.
    ///
    /// Inputs:
    /// - Three-level forest loaded through `handle_installations_result`.
    ///
    /// Output:
    /// - Every header's summary equals `of_descendants` of its node.
    fn header_counts_come_from_load() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut tree = InstallationTree::new(InstallationFilter::default());
        tree.load_installations(&tx);
        let forest = vec![
            node(
                "a",
                "Failed",
                vec![
                    node("a0", "Succeeded", vec![node("a00", "Progressing", vec![])]),
                    node("a1", "Failed", vec![]),
                ],
            ),
            node("b", "Succeeded", vec![]),
        ];
        tree.handle_installations_result(1, Ok(forest));
        assert_eq!(
            tree.summary(&[0]),
            StatusSummary { succeeded: 1, failed: 1, other: 1 }
        );
        tree.toggle(&[0]);
        tree.toggle(&[0, 0]);
        for row in tree.visible_rows() {
            if let RowKind::Header { summary, .. } = row.kind {
                let node = tree.node_at(&row.path).expect("header path resolves");
                assert_eq!(summary, StatusSummary::of_descendants(node), "{:?}", row.path);
            }
        }
    }

    #[test]
    /// What: An open panel lists the execution's deploy items with their glyphs.
    fn deploy_items_follow_execution_line() {
        let mut root = node("a", "Progressing", vec![]);
        root.execution = Some(ExecutionData {
            name: "exec-a".to_string(),
            namespace: "dummy-ns".to_string(),
            up_to_date: true,
            phase: Phase::Progressing,
            deploy_items: vec![
                DeployItemData {
                    name: "di-0".to_string(),
                    namespace: "dummy-ns".to_string(),
                    up_to_date: true,
                    phase: Phase::Succeeded,
                },
                DeployItemData {
                    name: "di-1".to_string(),
                    namespace: "dummy-ns".to_string(),
                    up_to_date: false,
                    phase: Phase::Failed,
                },
            ],
        });
        assert_eq!(render_node(&root).deploy_items.len(), 2);

        let mut tree = InstallationTree::with_placeholder(InstallationFilter::default(), vec![root]);
        tree.toggle(&[0]);
        let rows = tree.visible_rows();
        // header, 4 details, caption, execution, 2 deploy items
        assert_eq!(rows.len(), 9);
        assert!(matches!(rows[6].kind, RowKind::Execution(_)));
        assert_eq!(
            rows[8].kind,
            RowKind::DeployItem(DeployItemLine {
                glyph: PhaseGlyph::Error,
                title: "dummy-ns / di-1".to_string(),
                phase: "Failed".to_string(),
            })
        );
    }

    #[test]
    /// What: Selection walks visible headers and collapse climbs to the parent.
    fn selection_moves_over_headers() {
        let mut tree = InstallationTree::with_placeholder(
            InstallationFilter::default(),
            vec![node("a", "Failed", vec![node("a0", "Succeeded", vec![])]), node("b", "Failed", vec![])],
        );
        tree.toggle_selected();
        tree.move_selection(1);
        assert_eq!(tree.selected(), Some(&[0, 0][..]));
        tree.move_selection(1);
        assert_eq!(tree.selected(), Some(&[1][..]));
        tree.move_selection(-1);
        tree.collapse_selected();
        assert_eq!(tree.selected(), Some(&[0][..]));
    }

    #[test]
    /// What: Failed and stale loads keep the resident forest.
    fn failed_and_stale_loads_keep_forest() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut tree = InstallationTree::with_placeholder(
            InstallationFilter::default(),
            vec![node("placeholder", "Progressing", vec![])],
        );
        tree.load_installations(&tx);
        assert_eq!(tree.handle_installations_result(0, Ok(vec![])), Completion::Stale);
        assert_eq!(
            tree.handle_installations_result(1, Err(FetchError::Network("down".into()))),
            Completion::Failed
        );
        assert_eq!(tree.forest().len(), 1);
        assert!(matches!(tree.load_state(), TreeLoad::Failed(_)));
    }
}
