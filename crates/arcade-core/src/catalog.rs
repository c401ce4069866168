use serde::{Deserialize, Deserializer, Serialize};

use crate::slug::is_reserved;

/// One playable game and its listing metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Game {
    pub title: String,
    /// Primary key and URL path segment.
    pub slug: String,
    pub description: String,
    pub keywords: String,
    pub image: String,
    pub icon: String,
    pub embed_url: String,
    pub created_at: String,
    #[serde(deserialize_with = "lenient_count")]
    pub plays: u64,
    pub long_description: String,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
    /// Slugs of related games in the same catalog.
    pub related: Vec<String>,
    /// Slugs of games shown in the popular sidebar.
    pub popular: Vec<String>,
}

/// The whole site catalog as stored in `games.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    #[serde(rename = "baseUrl")]
    pub base_url: String,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
    pub games: Vec<Game>,
}

/// Where an upserted game ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum UpsertOutcome {
    Replaced { index: usize },
    Inserted { index: usize },
}

impl UpsertOutcome {
    pub fn index(self) -> usize {
        match self {
            Self::Replaced { index } | Self::Inserted { index } => index,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    EmptySlug,
    /// Renaming a game onto a slug owned by another game.
    SlugConflict { slug: String },
    /// The slug names a directory the site itself uses.
    ReservedSlug { slug: String },
    UnknownGame(String),
    Parse(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySlug => write!(f, "game has no slug and no title to derive one from"),
            Self::SlugConflict { slug } => {
                write!(f, "slug '{slug}' already belongs to another game")
            },
            Self::ReservedSlug { slug } => {
                write!(f, "slug '{slug}' is reserved for a site page")
            },
            Self::UnknownGame(slug) => write!(f, "no game with slug '{slug}'"),
            Self::Parse(m) => write!(f, "invalid catalog: {m}"),
        }
    }
}

impl std::error::Error for CatalogError {}

impl Catalog {
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(text).map_err(|e| CatalogError::Parse(e.to_string()))
    }

    /// Pretty-printed JSON with 2-space indentation.
    pub fn to_pretty_json(&self) -> String {
        // Plain strings, integers and lists cannot fail to serialize.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    pub fn find(&self, slug: &str) -> Option<&Game> {
        self.games.iter().find(|g| g.slug == slug)
    }

    pub fn position(&self, slug: &str) -> Option<usize> {
        self.games.iter().position(|g| g.slug == slug)
    }

    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = base_url.into();
    }

    /// Insert or replace a game.
    ///
    /// The record is located by `previous_slug` (the slug it had before the
    /// edit) and then by its current slug. A located record is replaced in
    /// place; otherwise the game is appended. Renaming a record onto a slug
    /// owned by a different record is rejected and leaves the catalog as is.
    /// Without a previous slug, a game whose slug already exists replaces
    /// that record. Slugs of site directories (`tags`, `browse`, ...) are
    /// rejected.
    pub fn upsert(
        &mut self,
        previous_slug: Option<&str>,
        game: Game,
    ) -> Result<UpsertOutcome, CatalogError> {
        if game.slug.is_empty() {
            return Err(CatalogError::EmptySlug);
        }
        if is_reserved(&game.slug) {
            return Err(CatalogError::ReservedSlug { slug: game.slug });
        }

        let by_previous = previous_slug
            .filter(|s| !s.is_empty())
            .and_then(|s| self.position(s));
        let by_new = self.position(&game.slug);

        if let (Some(prev), Some(new)) = (by_previous, by_new)
            && prev != new
        {
            return Err(CatalogError::SlugConflict { slug: game.slug });
        }

        match by_previous.or(by_new) {
            Some(index) => {
                tracing::debug!(slug = %game.slug, index, "Replacing game");
                self.games[index] = game;
                Ok(UpsertOutcome::Replaced { index })
            },
            None => {
                tracing::debug!(slug = %game.slug, "Appending game");
                self.games.push(game);
                Ok(UpsertOutcome::Inserted {
                    index: self.games.len() - 1,
                })
            },
        }
    }

    /// Remove a game by slug, returning it.
    pub fn remove(&mut self, slug: &str) -> Result<Game, CatalogError> {
        let index = self
            .position(slug)
            .ok_or_else(|| CatalogError::UnknownGame(slug.to_string()))?;
        Ok(self.games.remove(index))
    }
}

/// Accept a JSON number, a numeric string, or null for a play count.
/// Anything else (negative, fractional, garbage) becomes 0.
fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        serde_json::Value::String(s) => parse_count(&s),
        _ => 0,
    })
}

/// Parse operator-entered play counts: leading integer digits, else 0.
pub fn parse_count(raw: &str) -> u64 {
    let trimmed = raw.trim();
    let digits: String = trimmed.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}
