//! Ordering and filtering of games for list pages.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::catalog::{Catalog, Game};
use crate::slug::slugify;

/// Seconds since the Unix epoch for a `created_at` value. Missing or
/// unparseable dates count as the epoch itself.
pub fn created_timestamp(created_at: &str) -> i64 {
    let s = created_at.trim();
    if s.is_empty() {
        return 0;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.timestamp();
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return dt.and_utc().timestamp();
        }
    }
    s.get(..10)
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or(0)
}

/// Newest first. Stable for equal dates.
pub fn sort_by_created_desc(games: &[Game]) -> Vec<&Game> {
    let mut sorted: Vec<&Game> = games.iter().collect();
    sorted.sort_by_key(|g| std::cmp::Reverse(created_timestamp(&g.created_at)));
    sorted
}

/// Most played first. Stable for equal counts.
pub fn sort_by_plays_desc(games: &[Game]) -> Vec<&Game> {
    let mut sorted: Vec<&Game> = games.iter().collect();
    sorted.sort_by_key(|g| std::cmp::Reverse(g.plays));
    sorted
}

/// Games carrying `tag`, compared by slug so `"Car Games"` matches `"car-games"`.
pub fn games_tagged<'a>(games: &'a [Game], tag: &str) -> Vec<&'a Game> {
    let wanted = slugify(tag);
    games
        .iter()
        .filter(|g| g.tags.iter().any(|t| slugify(t) == wanted))
        .collect()
}

pub fn games_in_category<'a>(games: &'a [Game], category: &str) -> Vec<&'a Game> {
    let wanted = slugify(category);
    games
        .iter()
        .filter(|g| g.categories.iter().any(|c| slugify(c) == wanted))
        .collect()
}

/// Resolve slug references against the catalog, silently dropping any that
/// point at games that no longer exist.
pub fn resolve_refs<'a>(catalog: &'a Catalog, slugs: &[String]) -> Vec<&'a Game> {
    slugs.iter().filter_map(|s| catalog.find(s)).collect()
}

/// Distinct names in first-seen order, deduplicated by slug.
pub fn distinct_by_slug(names: &[String]) -> Vec<(&str, String)> {
    let mut seen = std::collections::HashSet::new();
    names
        .iter()
        .filter_map(|name| {
            let slug = slugify(name);
            (!slug.is_empty() && seen.insert(slug.clone())).then_some((name.as_str(), slug))
        })
        .collect()
}
