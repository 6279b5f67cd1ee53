//! Generic filter → sort → regroup transform for subject collections.
//!
//! Issues and recommendations flow through the same function; only the
//! `Faceted` accessors differ between the two kinds.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::model::{Issue, Recommendation, SubjectGroup};

/// Facet selector for issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueFacet {
    Severity,
}

/// Facet selectors for recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationFacet {
    Complexity,
    Impact,
}

/// Field accessors that let the transform work over any item kind.
pub trait Faceted {
    /// Selector for the kind's graded fields.
    type Facet: Copy;

    fn title(&self) -> &str;
    fn description(&self) -> &str;
    fn keywords(&self) -> &[String];
    /// Graded field value, if present.
    fn facet(&self, facet: Self::Facet) -> Option<&str>;
    /// Timestamp-like value used by recency sorting.
    fn recency(&self) -> Option<&str> {
        None
    }
}

impl Faceted for Issue {
    type Facet = IssueFacet;

    fn title(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn keywords(&self) -> &[String] {
        &self.keywords
    }

    fn facet(&self, facet: IssueFacet) -> Option<&str> {
        match facet {
            IssueFacet::Severity => self.severity.as_deref(),
        }
    }
}

impl Faceted for Recommendation {
    type Facet = RecommendationFacet;

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn keywords(&self) -> &[String] {
        &self.addresses
    }

    fn facet(&self, facet: RecommendationFacet) -> Option<&str> {
        match facet {
            RecommendationFacet::Complexity => self.complexity.as_deref(),
            RecommendationFacet::Impact => self.impact.as_deref(),
        }
    }

    fn recency(&self) -> Option<&str> {
        self.last_seen.as_deref()
    }
}

/// Equality filter over one graded field; `All` passes everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter<F> {
    All,
    Only { facet: F, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey<F> {
    Title,
    Facet(F),
    Recency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Transient filter/sort settings for one collection view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSpec<F> {
    pub search_term: String,
    pub category: CategoryFilter<F>,
    pub sort_key: SortKey<F>,
    pub direction: SortDirection,
}

/// A change to one collection view's filter/sort settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecChange<F> {
    Search(String),
    Category(CategoryFilter<F>),
    Sort(SortKey<F>),
    Direction(SortDirection),
}

impl<F> PipelineSpec<F> {
    /// Pass-through spec: no search, no category filter, title ascending.
    pub fn new() -> Self {
        Self {
            search_term: String::new(),
            category: CategoryFilter::All,
            sort_key: SortKey::Title,
            direction: SortDirection::Ascending,
        }
    }

    pub fn apply(&mut self, change: SpecChange<F>) {
        match change {
            SpecChange::Search(term) => self.search_term = term,
            SpecChange::Category(category) => self.category = category,
            SpecChange::Sort(key) => self.sort_key = key,
            SpecChange::Direction(direction) => self.direction = direction,
        }
    }
}

impl<F> Default for PipelineSpec<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed ordinal table for graded fields; unknown or absent values rank 0.
pub fn level_rank(value: Option<&str>) -> u8 {
    match value {
        Some(v) if v.eq_ignore_ascii_case("high") => 3,
        Some(v) if v.eq_ignore_ascii_case("medium") => 2,
        Some(v) if v.eq_ignore_ascii_case("low") => 1,
        _ => 0,
    }
}

/// Applies the search and category filters, sorts, and regroups by subject.
///
/// Output items are always an identity subset of the input items. Groups left
/// empty by the filters are dropped rather than rendered empty, and regrouped
/// subjects appear in order of first appearance in the sorted sequence.
pub fn transform<T>(
    groups: &[SubjectGroup<T>],
    spec: &PipelineSpec<T::Facet>,
) -> Vec<SubjectGroup<T>>
where
    T: Faceted + Clone,
{
    let needle = spec.search_term.trim().to_lowercase();

    // Flatten, remembering each item's parent group for the regroup step.
    let mut flat: Vec<(&SubjectGroup<T>, &T)> = Vec::new();
    for group in groups {
        for item in &group.items {
            flat.push((group, item));
        }
    }

    if !needle.is_empty() {
        flat.retain(|(group, item)| matches_search(group, *item, &needle));
    }

    if let CategoryFilter::Only { facet, value } = &spec.category {
        flat.retain(|(_, item)| {
            item.facet(*facet)
                .is_some_and(|v| v.eq_ignore_ascii_case(value))
        });
    }

    // `sort_by` is stable, so ties keep their flattened source order.
    flat.sort_by(|(_, a), (_, b)| {
        let ordering = compare(*a, *b, spec.sort_key);
        match spec.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });

    regroup(flat)
}

fn matches_search<T: Faceted>(group: &SubjectGroup<T>, item: &T, needle: &str) -> bool {
    item.title().to_lowercase().contains(needle)
        || item.description().to_lowercase().contains(needle)
        || group.subject.to_lowercase().contains(needle)
        || item
            .keywords()
            .iter()
            .any(|keyword| keyword.to_lowercase().contains(needle))
}

fn compare<T: Faceted>(a: &T, b: &T, key: SortKey<T::Facet>) -> Ordering {
    match key {
        SortKey::Title => a.title().to_lowercase().cmp(&b.title().to_lowercase()),
        SortKey::Facet(facet) => level_rank(a.facet(facet)).cmp(&level_rank(b.facet(facet))),
        SortKey::Recency => a.recency().unwrap_or("").cmp(b.recency().unwrap_or("")),
    }
}

fn regroup<T: Faceted + Clone>(flat: Vec<(&SubjectGroup<T>, &T)>) -> Vec<SubjectGroup<T>> {
    let mut out: Vec<SubjectGroup<T>> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();
    for (group, item) in flat {
        let slot = *slots.entry(group.subject.clone()).or_insert_with(|| {
            out.push(SubjectGroup {
                subject: group.subject.clone(),
                summary: group.summary.clone(),
                generated_at: group.generated_at.clone(),
                items: Vec::new(),
            });
            out.len() - 1
        });
        out[slot].items.push(item.clone());
    }
    out
}
