//! Derived views over the note collection
//!
//! Filtering and aggregate counts. Nothing here mutates notes; every view is
//! recomputed from the collection on demand.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::models::{Category, Note, ParseError};

/// Category selector for the timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }
}

impl From<Option<Category>> for CategoryFilter {
    fn from(category: Option<Category>) -> Self {
        category.map_or(CategoryFilter::All, CategoryFilter::Only)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "all"),
            CategoryFilter::Only(c) => write!(f, "{}", c),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") || s.eq_ignore_ascii_case("todas") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

/// Category plus text search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    pub category: CategoryFilter,
    pub query: String,
}

impl NoteFilter {
    /// Filter that matches every note
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Whether `note` passes both the category and the text search
    ///
    /// A blank query matches everything; otherwise the note text must contain
    /// the query, ignoring case.
    pub fn matches(&self, note: &Note) -> bool {
        if !self.category.matches(note.category()) {
            return false;
        }
        if self.query.trim().is_empty() {
            return true;
        }
        note.text()
            .to_lowercase()
            .contains(&self.query.to_lowercase())
    }

    /// Matching notes, in collection order
    pub fn apply<'a>(&self, notes: &'a [Note]) -> Vec<&'a Note> {
        notes.iter().filter(|n| self.matches(n)).collect()
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

/// Aggregate counts over the whole collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    /// Notes per category; every category is present
    #[serde(rename = "porCat")]
    pub by_category: BTreeMap<Category, usize>,
    /// Sum of every reaction counter on every note
    #[serde(rename = "reaccTotal")]
    pub reactions_total: u64,
}

impl Stats {
    pub fn compute(notes: &[Note]) -> Self {
        let mut by_category: BTreeMap<Category, usize> =
            Category::ALL.into_iter().map(|c| (c, 0)).collect();
        let mut reactions_total = 0u64;

        for note in notes {
            *by_category.entry(note.category()).or_insert(0) += 1;
            reactions_total = reactions_total.saturating_add(note.reactions().total());
        }

        Self {
            total: notes.len(),
            by_category,
            reactions_total,
        }
    }

    /// Number of notes in `category`
    pub fn count_for(&self, category: Category) -> usize {
        self.by_category.get(&category).copied().unwrap_or(0)
    }
}
