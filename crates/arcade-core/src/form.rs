use serde::{Deserialize, Serialize};

use crate::catalog::{Game, parse_count};
use crate::slug::slugify;

/// Raw operator input for one game, field for field as the edit form holds it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameForm {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub keywords: String,
    pub image: String,
    pub icon: String,
    pub embed_url: String,
    /// Date input value (`YYYY-MM-DD`).
    pub created_at: String,
    /// Text of the plays input; parsed leniently.
    pub plays: String,
    pub long_description: String,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
    pub related: Vec<String>,
    pub popular: Vec<String>,
}

impl GameForm {
    /// Empty form for creating a new game.
    pub fn blank() -> Self {
        Self {
            plays: "0".to_string(),
            ..Self::default()
        }
    }

    /// Populate the form from a stored game.
    pub fn from_game(game: &Game) -> Self {
        Self {
            title: game.title.clone(),
            slug: game.slug.clone(),
            description: game.description.clone(),
            keywords: game.keywords.clone(),
            image: game.image.clone(),
            icon: game.icon.clone(),
            embed_url: game.embed_url.clone(),
            created_at: game.created_at.chars().take(10).collect(),
            plays: game.plays.to_string(),
            long_description: game.long_description.clone(),
            tags: game.tags.clone(),
            categories: game.categories.clone(),
            related: game.related.clone(),
            popular: game.popular.clone(),
        }
    }

    /// Read the form back into a game record. A blank slug is derived from
    /// the title.
    pub fn to_game(&self) -> Game {
        let slug = match self.slug.trim() {
            "" => slugify(&self.title),
            s => s.to_string(),
        };
        Game {
            title: self.title.trim().to_string(),
            slug,
            description: self.description.trim().to_string(),
            keywords: self.keywords.trim().to_string(),
            image: self.image.trim().to_string(),
            icon: self.icon.trim().to_string(),
            embed_url: self.embed_url.trim().to_string(),
            created_at: self.created_at.trim().to_string(),
            plays: parse_count(&self.plays),
            long_description: self.long_description.clone(),
            tags: self.tags.clone(),
            categories: self.categories.clone(),
            related: self.related.clone(),
            popular: self.popular.clone(),
        }
    }
}

impl From<&Game> for GameForm {
    fn from(game: &Game) -> Self {
        Self::from_game(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_slug_derived_from_title() {
        let form = GameForm {
            title: "  Space Race ".to_string(),
            ..GameForm::blank()
        };
        let game = form.to_game();
        assert_eq!(game.title, "Space Race");
        assert_eq!(game.slug, "space-race");
        assert_eq!(game.plays, 0);
    }

    #[test]
    fn explicit_slug_is_kept() {
        let form = GameForm {
            title: "Space Race".to_string(),
            slug: " sr-2 ".to_string(),
            ..GameForm::blank()
        };
        assert_eq!(form.to_game().slug, "sr-2");
    }

    #[test]
    fn malformed_plays_become_zero() {
        let form = GameForm {
            slug: "x".to_string(),
            plays: "many".to_string(),
            ..GameForm::default()
        };
        assert_eq!(form.to_game().plays, 0);
    }

    #[test]
    fn fill_truncates_timestamp_to_date() {
        let game = Game {
            slug: "x".to_string(),
            created_at: "2025-03-04T12:30:00Z".to_string(),
            plays: 77,
            ..Game::default()
        };
        let form = GameForm::from(&game);
        assert_eq!(form.created_at, "2025-03-04");
        assert_eq!(form.plays, "77");
    }

    #[test]
    fn long_description_is_not_trimmed() {
        let form = GameForm {
            slug: "x".to_string(),
            long_description: "  indented\n".to_string(),
            ..GameForm::default()
        };
        assert_eq!(form.to_game().long_description, "  indented\n");
    }

    #[test]
    fn fill_then_read_preserves_lists() {
        let game = Game {
            title: "T".to_string(),
            slug: "t".to_string(),
            tags: vec!["a".to_string()],
            related: vec!["u".to_string()],
            popular: vec!["v".to_string(), "w".to_string()],
            created_at: "2024-01-01".to_string(),
            plays: 5,
            ..Game::default()
        };
        assert_eq!(GameForm::from(&game).to_game(), game);
    }
}
