pub mod catalog;
pub mod form;
pub mod format;
pub mod listing;
pub mod merge;
pub mod render;
pub mod settings;
pub mod site;
pub mod slug;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::catalog::{Catalog, Game};
    use crate::form::GameForm;

    /// Build a game with the given slug and a title derived from it.
    pub fn make_game(slug: &str, created_at: &str, plays: u64) -> Game {
        Game {
            title: slug
                .split('-')
                .map(|w| {
                    let mut chars = w.chars();
                    match chars.next() {
                        Some(c) => c.to_uppercase().chain(chars).collect::<String>(),
                        None => String::new(),
                    }
                })
                .collect::<Vec<_>>()
                .join(" "),
            slug: slug.to_string(),
            description: format!("Play {slug} online."),
            icon: format!("{slug}.png"),
            embed_url: format!("https://embed.example/{slug}"),
            created_at: created_at.to_string(),
            plays,
            ..Game::default()
        }
    }

    /// A small catalog with three games, two tags and one category.
    pub fn sample_catalog() -> Catalog {
        let mut snake = make_game("snake", "2024-05-01", 1_200);
        snake.tags = vec!["Classic".to_string()];
        snake.categories = vec!["Arcade".to_string()];
        snake.related = vec!["tetris".to_string()];

        let mut tetris = make_game("tetris", "2025-02-10", 45_000);
        tetris.tags = vec!["Classic".to_string(), "Puzzle".to_string()];
        tetris.categories = vec!["Arcade".to_string()];
        tetris.popular = vec!["snake".to_string(), "deleted-game".to_string()];

        let pong = make_game("pong", "2023-11-20", 300);

        Catalog {
            base_url: "https://games.example.com".to_string(),
            tags: vec!["Classic".to_string(), "Puzzle".to_string()],
            categories: vec!["Arcade".to_string()],
            games: vec![snake, tetris, pong],
        }
    }

    /// The sample catalog serialised the way `games.json` stores it.
    pub fn sample_catalog_json() -> String {
        sample_catalog().to_pretty_json()
    }

    /// Form input for a brand new game with a blank slug.
    pub fn new_game_form(title: &str) -> GameForm {
        GameForm {
            title: title.to_string(),
            description: format!("{title} description."),
            embed_url: "https://embed.example/new".to_string(),
            plays: "10".to_string(),
            ..GameForm::blank()
        }
    }
}
