//! Data models for Diario
//!
//! Defines the journal entry (`Note`) and the closed vocabularies it is built
//! from: categories, the two author profiles, and reaction kinds.
//!
//! The field names on the wire (`texto`, `categoria`, `fecha`, ...) are the ones
//! used by the persisted store and by exported files, so existing journals keep
//! loading.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::error::JournalError;

/// Error returned when a category, profile or reaction name is not recognized
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind} '{value}'. Expected one of: {expected}")]
pub struct ParseError {
    kind: &'static str,
    value: String,
    expected: String,
}

impl ParseError {
    fn new(kind: &'static str, value: &str, expected: impl Iterator<Item = &'static str>) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected: expected.collect::<Vec<_>>().join(", "),
        }
    }
}

/// Topical tag applied to a note
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Carinitos,
    Favores,
    Reminders,
    Recuerdos,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 4] = [
        Category::Carinitos,
        Category::Favores,
        Category::Reminders,
        Category::Recuerdos,
    ];

    /// Identifier used in storage and on the command line
    pub fn id(&self) -> &'static str {
        match self {
            Category::Carinitos => "carinitos",
            Category::Favores => "favores",
            Category::Reminders => "reminders",
            Category::Recuerdos => "recuerdos",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Category::Carinitos => "Cariñitos",
            Category::Favores => "Favores",
            Category::Reminders => "Friendly reminders",
            Category::Recuerdos => "Recuerdos bonitos",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Category {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseError::new("category", s, Category::ALL.iter().map(|c| c.id())))
    }
}

/// One of the two people writing in the journal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    #[default]
    Mj,
    Luis,
}

impl Profile {
    pub const ALL: [Profile; 2] = [Profile::Mj, Profile::Luis];

    pub fn id(&self) -> &'static str {
        match self {
            Profile::Mj => "mj",
            Profile::Luis => "luis",
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Profile::Mj => "MJ",
            Profile::Luis => "Luis",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Profile::Mj => "🌞",
            Profile::Luis => "🎵",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Profile {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Profile::ALL
            .into_iter()
            .find(|p| p.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseError::new("profile", s, Profile::ALL.iter().map(|p| p.id())))
    }
}

/// Emoji counter that can be attached to a note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactionKind {
    Heart,
    Star,
    Sun,
    Music,
}

impl ReactionKind {
    pub const ALL: [ReactionKind; 4] = [
        ReactionKind::Heart,
        ReactionKind::Star,
        ReactionKind::Sun,
        ReactionKind::Music,
    ];

    /// Key used in the persisted `reacciones` record
    pub fn key(&self) -> &'static str {
        match self {
            ReactionKind::Heart => "heart",
            ReactionKind::Star => "star",
            ReactionKind::Sun => "sun",
            ReactionKind::Music => "music",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            ReactionKind::Heart => "❤️",
            ReactionKind::Star => "⭐️",
            ReactionKind::Sun => "☀️",
            ReactionKind::Music => "🎵",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReactionKind::Heart => "Amor",
            ReactionKind::Star => "Estrella",
            ReactionKind::Sun => "Sol",
            ReactionKind::Music => "Música",
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for ReactionKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReactionKind::ALL
            .into_iter()
            .find(|r| r.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ParseError::new("reaction", s, ReactionKind::ALL.iter().map(|r| r.key()))
            })
    }
}

/// Reaction counters for a single note
///
/// One field per [`ReactionKind`], so every kind always has a count and no
/// other key can exist. Keys missing from stored data load as zero; unknown
/// keys are dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reactions {
    heart: u64,
    star: u64,
    sun: u64,
    music: u64,
}

impl Reactions {
    /// Count for one reaction kind
    pub fn get(&self, kind: ReactionKind) -> u64 {
        match kind {
            ReactionKind::Heart => self.heart,
            ReactionKind::Star => self.star,
            ReactionKind::Sun => self.sun,
            ReactionKind::Music => self.music,
        }
    }

    /// Add one to the count for `kind`, returning the new count
    pub fn increment(&mut self, kind: ReactionKind) -> u64 {
        let slot = match kind {
            ReactionKind::Heart => &mut self.heart,
            ReactionKind::Star => &mut self.star,
            ReactionKind::Sun => &mut self.sun,
            ReactionKind::Music => &mut self.music,
        };
        *slot = slot.saturating_add(1);
        *slot
    }

    /// Sum of all counters
    pub fn total(&self) -> u64 {
        ReactionKind::ALL.iter().map(|k| self.get(*k)).sum()
    }

    /// Iterate over `(kind, count)` pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (ReactionKind, u64)> + '_ {
        ReactionKind::ALL.into_iter().map(move |k| (k, self.get(k)))
    }
}

/// A journal entry
///
/// Notes are immutable once created; only their reaction counters change,
/// and only through the journal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Note {
    /// Unique identifier
    id: Uuid,
    /// Message text (may be empty when a photo is attached)
    #[serde(rename = "texto", default)]
    text: String,
    #[serde(rename = "categoria")]
    category: Category,
    /// When this note was written
    #[serde(rename = "fecha")]
    created_at: DateTime<Utc>,
    /// Inline `data:` URL of an attached photo
    #[serde(
        rename = "fotoDataUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    photo: Option<String>,
    #[serde(rename = "reacciones", default)]
    reactions: Reactions,
    #[serde(rename = "autor")]
    author: Profile,
}

impl Note {
    /// Compose a new note
    ///
    /// The text is trimmed. A note must carry either text or a photo.
    pub fn new(
        author: Profile,
        category: Category,
        text: impl Into<String>,
        photo: Option<String>,
    ) -> Result<Self, JournalError> {
        let text = text.into().trim().to_string();
        let photo = photo.filter(|p| !p.is_empty());

        if text.is_empty() && photo.is_none() {
            return Err(JournalError::EmptyNote);
        }

        Ok(Self {
            id: Uuid::new_v4(),
            text,
            category,
            created_at: Utc::now(),
            photo,
            reactions: Reactions::default(),
            author,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Message text, empty for photo-only notes
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Inline `data:` URL of the attached photo
    pub fn photo(&self) -> Option<&str> {
        self.photo.as_deref()
    }

    pub fn author(&self) -> Profile {
        self.author
    }

    /// Reaction counters
    pub fn reactions(&self) -> &Reactions {
        &self.reactions
    }

    pub fn has_photo(&self) -> bool {
        self.photo.is_some()
    }

    /// Whether a decoded record carries text or a photo
    ///
    /// `Note::new` guarantees this; records read from a document may not.
    pub fn has_content(&self) -> bool {
        !self.text.trim().is_empty() || self.photo.as_deref().is_some_and(|p| !p.is_empty())
    }

    pub(crate) fn react(&mut self, kind: ReactionKind) -> u64 {
        self.reactions.increment(kind)
    }
}
