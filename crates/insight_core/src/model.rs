use std::collections::BTreeMap;

/// Authentication state as seen by the client.
///
/// `Loading` is the initial value and is only re-entered on a full restart;
/// the probe settles it into one of the two terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Loading,
    Authenticated,
    Unauthenticated,
}

/// Health of one upstream connection reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamState {
    Connected,
    Error,
}

/// Latest job-status snapshot. Replaced wholesale on every accepted poll
/// tick, never patched field by field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobStatus {
    pub in_progress: bool,
    pub raw_count: u64,
    pub analyzed_count: u64,
    pub issue_count: u64,
    pub analysis_count: u64,
    pub last_run_at: Option<String>,
    pub upstreams: BTreeMap<String, UpstreamState>,
    pub sources_covered: Vec<String>,
}

pub type NotificationId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// A transient banner message. At most one is ever live; a new one replaces
/// the old outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    /// Milliseconds until auto-dismissal; 0 persists until dismissed.
    pub ttl_ms: u64,
}

/// A categorized problem extracted from source content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub name: String,
    pub description: String,
    pub severity: Option<String>,
    pub keywords: Vec<String>,
    pub solutions: Option<String>,
}

/// An actionable suggestion addressing one or more issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    pub complexity: Option<String>,
    pub impact: Option<String>,
    pub addresses: Vec<String>,
    pub last_seen: Option<String>,
}

/// A raw extracted issue with its computed severity score, listed on the
/// dashboard before any grouping or analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct RawIssue {
    pub name: String,
    pub description: String,
    pub frequency: u64,
    pub sentiment: f64,
    pub mentions: u64,
    pub subject: Option<String>,
    pub score: f64,
}

/// Items aggregated under their grouping subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectGroup<T> {
    pub subject: String,
    pub summary: Option<String>,
    pub generated_at: Option<String>,
    pub items: Vec<T>,
}

/// Upper bound accepted by the backend for the per-source item limit.
pub const JOB_LIMIT_MAX: u32 = 500;

/// Parameters for the backend collection job, edited through the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRequest {
    pub subjects: Vec<String>,
    pub sources: Vec<String>,
    pub limit: u32,
    pub window: String,
    pub use_ai: bool,
}

impl Default for JobRequest {
    fn default() -> Self {
        Self {
            subjects: Vec::new(),
            sources: Vec::new(),
            limit: 75,
            window: "week".to_string(),
            use_ai: false,
        }
    }
}

/// An edit to the job-request form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEdit {
    AddSubject(String),
    RemoveSubject(String),
    AddSource(String),
    RemoveSource(String),
    LimitChanged(u32),
    WindowChanged(String),
    UseAiChanged(bool),
}

impl JobRequest {
    /// Applies an edit; returns whether anything changed.
    pub fn apply(&mut self, edit: FormEdit) -> bool {
        match edit {
            FormEdit::AddSubject(name) => push_unique(&mut self.subjects, name),
            FormEdit::RemoveSubject(name) => remove_value(&mut self.subjects, &name),
            FormEdit::AddSource(name) => push_unique(&mut self.sources, name),
            FormEdit::RemoveSource(name) => remove_value(&mut self.sources, &name),
            FormEdit::LimitChanged(limit) => {
                let changed = self.limit != limit;
                self.limit = limit;
                changed
            }
            FormEdit::WindowChanged(window) => {
                let changed = self.window != window;
                self.window = window;
                changed
            }
            FormEdit::UseAiChanged(use_ai) => {
                let changed = self.use_ai != use_ai;
                self.use_ai = use_ai;
                changed
            }
        }
    }
}

fn push_unique(values: &mut Vec<String>, value: String) -> bool {
    let value = value.trim().to_string();
    if value.is_empty() || values.contains(&value) {
        return false;
    }
    values.push(value);
    true
}

fn remove_value(values: &mut Vec<String>, value: &str) -> bool {
    let before = values.len();
    values.retain(|v| v != value);
    values.len() != before
}
