use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};

use arcade_core::catalog::{Catalog, UpsertOutcome};
use arcade_core::form::GameForm;
use arcade_core::render::detail::game_page;
use arcade_core::site::{SitePage, plan_game_page, plan_homepage, plan_list_pages};

use crate::error::AppError;
use crate::state::AppState;
use crate::store::CatalogStore;
use crate::writer::{FileStatus, PageWrite, WriteReport, sha256_hex};

/// Body of the upsert-style endpoints: the edited form plus the slug the
/// record had when it was loaded into the form.
#[derive(Debug, Deserialize)]
pub struct UpsertBody {
    #[serde(default)]
    pub previous_slug: Option<String>,
    pub form: GameForm,
}

#[derive(Debug, Serialize)]
pub struct UpsertResponse {
    pub slug: String,
    pub outcome: UpsertOutcome,
}

#[derive(Debug, Deserialize)]
pub struct BaseUrlBody {
    pub base_url: String,
}

/// Entry of the game selector.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct GameSummary {
    pub slug: String,
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub path: String,
    pub games: usize,
}

/// Result of a site write action.
#[derive(Debug, Serialize)]
pub struct SiteWriteResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upsert: Option<UpsertResponse>,
    pub message: String,
    pub report: WriteReport,
}

impl SiteWriteResponse {
    fn new(upsert: Option<UpsertResponse>, report: WriteReport) -> Self {
        Self {
            upsert,
            message: report.summary(),
            report,
        }
    }
}

fn attachment(filename: &str, content_type: &'static str, body: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response()
}

/// Apply a form to the catalog.
fn upsert_form(catalog: &mut Catalog, body: UpsertBody) -> Result<UpsertResponse, AppError> {
    let game = body.form.to_game();
    let slug = game.slug.clone();
    let outcome = catalog.upsert(body.previous_slug.as_deref(), game)?;
    tracing::info!(slug = %slug, ?outcome, "Upserted game");
    Ok(UpsertResponse { slug, outcome })
}

/// Save the catalog file and record it in the report.
async fn persist_into(store: &CatalogStore, report: &mut WriteReport) {
    let path = store.path().display().to_string();
    let existed = tokio::fs::try_exists(store.path()).await.unwrap_or(false);
    match store.persist().await {
        Ok(()) => report.record(
            path,
            PageWrite {
                status: if existed {
                    FileStatus::Replaced
                } else {
                    FileStatus::Created
                },
                sha256: sha256_hex(store.catalog().to_pretty_json().as_bytes()),
            },
        ),
        Err(e) => {
            tracing::error!("Failed to save catalog: {e}");
            report.push(
                path,
                FileStatus::Failed {
                    reason: e.to_string(),
                },
            );
        },
    }
}

async fn write_pages(state: &AppState, store: &CatalogStore, pages: &[SitePage]) -> WriteReport {
    let mut report = state.writer.write_all(pages).await;
    persist_into(store, &mut report).await;
    tracing::info!("{}", report.summary());
    report
}

/// GET /api/v1/catalog
pub async fn get_catalog(State(state): State<AppState>) -> Json<Catalog> {
    Json(state.store.read().await.catalog().clone())
}

/// PUT /api/v1/catalog/base-url
pub async fn put_base_url(
    State(state): State<AppState>,
    Json(body): Json<BaseUrlBody>,
) -> Json<serde_json::Value> {
    let mut store = state.store.write().await;
    let base_url = body.base_url.trim().to_string();
    store.set_base_url(base_url.clone());
    Json(serde_json::json!({ "baseUrl": base_url }))
}

/// GET /api/v1/catalog/download
pub async fn download_catalog(State(state): State<AppState>) -> Response {
    let json = state.store.read().await.catalog().to_pretty_json();
    attachment("games.json", "application/json", json)
}

/// POST /api/v1/catalog/save
pub async fn save_catalog(State(state): State<AppState>) -> Result<Json<SaveResponse>, AppError> {
    let store = state.store.read().await;
    store.persist().await?;
    Ok(Json(SaveResponse {
        path: store.path().display().to_string(),
        games: store.catalog().games.len(),
    }))
}

/// GET /api/v1/games
pub async fn list_games(State(state): State<AppState>) -> Json<Vec<GameSummary>> {
    let store = state.store.read().await;
    Json(
        store
            .catalog()
            .games
            .iter()
            .map(|g| GameSummary {
                slug: g.slug.clone(),
                title: g.title.clone(),
            })
            .collect(),
    )
}

/// GET /api/v1/games/new
pub async fn new_game_form() -> Json<GameForm> {
    Json(GameForm::blank())
}

/// GET /api/v1/games/{slug}
pub async fn get_game(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<GameForm>, AppError> {
    let store = state.store.read().await;
    let game = store
        .catalog()
        .find(&slug)
        .ok_or_else(|| AppError::NotFound(format!("no game with slug '{slug}'")))?;
    Ok(Json(GameForm::from_game(game)))
}

/// PUT /api/v1/games
pub async fn put_game(
    State(state): State<AppState>,
    Json(body): Json<UpsertBody>,
) -> Result<Json<UpsertResponse>, AppError> {
    let mut store = state.store.write().await;
    Ok(Json(upsert_form(store.catalog_mut(), body)?))
}

/// DELETE /api/v1/games/{slug}
pub async fn delete_game(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut store = state.store.write().await;
    store.catalog_mut().remove(&slug)?;
    tracing::info!(slug = %slug, "Removed game");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/preview: render a form without touching the catalog.
pub async fn preview(State(state): State<AppState>, Json(form): Json<GameForm>) -> Html<String> {
    let store = state.store.read().await;
    let game = form.to_game();
    Html(game_page(&state.render_context(&store), &game))
}

/// POST /api/v1/games/download: upsert, then return the detail page as a file.
pub async fn download_game(
    State(state): State<AppState>,
    Json(body): Json<UpsertBody>,
) -> Result<Response, AppError> {
    let mut store = state.store.write().await;
    let upsert = upsert_form(store.catalog_mut(), body)?;
    let catalog = store.catalog();
    let game = catalog
        .find(&upsert.slug)
        .ok_or_else(|| AppError::Internal(format!("game '{}' vanished", upsert.slug)))?;
    let html = game_page(&state.render_context(&store), game);
    Ok(attachment(
        &format!("{}.html", upsert.slug),
        "text/html; charset=utf-8",
        html,
    ))
}

/// POST /api/v1/site/game: upsert and write `<slug>/index.html`.
pub async fn write_game_page(
    State(state): State<AppState>,
    Json(body): Json<UpsertBody>,
) -> Result<Json<SiteWriteResponse>, AppError> {
    let mut store = state.store.write().await;
    let upsert = upsert_form(store.catalog_mut(), body)?;
    let page = {
        let catalog = store.catalog();
        let game = catalog
            .find(&upsert.slug)
            .ok_or_else(|| AppError::Internal(format!("game '{}' vanished", upsert.slug)))?;
        plan_game_page(&state.render_context(&store), game)
    };
    // The catalog is saved even when the page fails, so memory and disk agree.
    let mut report = WriteReport::default();
    report.record_result(page.path.clone(), state.writer.write_page(&page).await);
    persist_into(&store, &mut report).await;
    tracing::info!("{}", report.summary());
    Ok(Json(SiteWriteResponse::new(Some(upsert), report)))
}

/// POST /api/v1/site/home
pub async fn write_homepage(State(state): State<AppState>) -> Json<SiteWriteResponse> {
    let store = state.store.read().await;
    let page = plan_homepage(&state.render_context(&store));
    let report = write_pages(&state, &store, &[page]).await;
    Json(SiteWriteResponse::new(None, report))
}

/// POST /api/v1/site/lists
pub async fn write_list_pages(State(state): State<AppState>) -> Json<SiteWriteResponse> {
    let store = state.store.read().await;
    let pages = plan_list_pages(&state.render_context(&store));
    let report = write_pages(&state, &store, &pages).await;
    Json(SiteWriteResponse::new(None, report))
}

/// POST /api/v1/site/all: upsert, then write the game page, the homepage,
/// every list page and the catalog.
pub async fn write_everything(
    State(state): State<AppState>,
    Json(body): Json<UpsertBody>,
) -> Result<Json<SiteWriteResponse>, AppError> {
    let mut store = state.store.write().await;
    let upsert = upsert_form(store.catalog_mut(), body)?;
    let pages = {
        let catalog = store.catalog();
        let ctx = state.render_context(&store);
        let game = catalog
            .find(&upsert.slug)
            .ok_or_else(|| AppError::Internal(format!("game '{}' vanished", upsert.slug)))?;
        let mut pages = vec![plan_game_page(&ctx, game), plan_homepage(&ctx)];
        pages.extend(plan_list_pages(&ctx));
        pages
    };
    let report = write_pages(&state, &store, &pages).await;
    Ok(Json(SiteWriteResponse::new(Some(upsert), report)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AdminConfig;
    use arcade_core::test_helpers::{new_game_form, sample_catalog};

    fn state_in(dir: &std::path::Path) -> AppState {
        let config = AdminConfig {
            catalog_path: dir.join("games.json"),
            site_root: dir.join("site"),
            ..AdminConfig::default()
        };
        let store = CatalogStore::new(config.catalog_path.clone(), sample_catalog());
        AppState::new(config, store)
    }

    fn body(previous_slug: Option<&str>, form: GameForm) -> Json<UpsertBody> {
        Json(UpsertBody {
            previous_slug: previous_slug.map(str::to_string),
            form,
        })
    }

    #[tokio::test]
    async fn new_game_is_appended() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(dir.path());
        let Json(resp) = put_game(State(state.clone()), body(None, new_game_form("Space Race")))
            .await
            .unwrap();
        assert_eq!(resp.slug, "space-race");
        assert_eq!(resp.outcome, UpsertOutcome::Inserted { index: 3 });

        let Json(list) = list_games(State(state)).await;
        assert_eq!(list.len(), 4);
        assert_eq!(list[3].title, "Space Race");
    }

    #[tokio::test]
    async fn rename_keeps_position() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(dir.path());
        let Json(mut form) = get_game(State(state.clone()), Path("snake".to_string()))
            .await
            .unwrap();
        form.slug = "snake-classic".to_string();
        let Json(resp) = put_game(State(state.clone()), body(Some("snake"), form))
            .await
            .unwrap();
        assert_eq!(resp.outcome, UpsertOutcome::Replaced { index: 0 });
        let store = state.store.read().await;
        assert_eq!(store.catalog().games[0].slug, "snake-classic");
        assert!(store.catalog().find("snake").is_none());
    }

    #[tokio::test]
    async fn rename_onto_existing_slug_conflicts() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(dir.path());
        let Json(mut form) = get_game(State(state.clone()), Path("snake".to_string()))
            .await
            .unwrap();
        form.slug = "pong".to_string();
        let err = put_game(State(state.clone()), body(Some("snake"), form))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(state.store.read().await.catalog(), &sample_catalog());
    }

    #[tokio::test]
    async fn site_directory_slug_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(dir.path());
        let err = put_game(State(state.clone()), body(None, new_game_form("Tags")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(state.store.read().await.catalog(), &sample_catalog());
    }

    #[tokio::test]
    async fn unknown_game_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(dir.path());
        let err = get_game(State(state.clone()), Path("ghost".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        let err = delete_game(State(state), Path("ghost".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn preview_does_not_modify_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(dir.path());
        let Html(html) = preview(State(state.clone()), Json(new_game_form("Preview Me"))).await;
        assert!(html.contains("<title>Preview Me</title>"));
        assert_eq!(state.store.read().await.catalog().games.len(), 3);
    }

    #[tokio::test]
    async fn write_game_page_writes_file_and_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(dir.path());
        let Json(resp) =
            write_game_page(State(state.clone()), body(None, new_game_form("Space Race")))
                .await
                .unwrap();
        assert_eq!(resp.report.files.len(), 2);
        assert_eq!(resp.report.files[0].path, "space-race/index.html");
        assert_eq!(resp.report.files[0].status, FileStatus::Created);
        assert!(resp.report.is_success());

        let page = std::fs::read_to_string(dir.path().join("site/space-race/index.html")).unwrap();
        assert!(page.contains("<title>Space Race</title>"));
        let saved = CatalogStore::load(dir.path().join("games.json")).await.unwrap();
        assert!(saved.catalog().find("space-race").is_some());
    }

    #[tokio::test]
    async fn catalog_status_follows_file_existence() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(dir.path());
        let Json(first) = write_homepage(State(state.clone())).await;
        assert_eq!(first.report.files[1].status, FileStatus::Created);
        let Json(second) = write_homepage(State(state)).await;
        assert_eq!(second.report.files[1].status, FileStatus::Replaced);
        let saved = std::fs::read(dir.path().join("games.json")).unwrap();
        assert_eq!(second.report.files[1].sha256, Some(sha256_hex(&saved)));
    }

    #[tokio::test]
    async fn catalog_saved_when_game_page_fails() {
        let dir = tempfile::tempdir().unwrap();
        // A plain file where the site root directory belongs.
        std::fs::write(dir.path().join("site"), "not a directory").unwrap();
        let state = state_in(dir.path());
        let Json(resp) =
            write_game_page(State(state.clone()), body(None, new_game_form("Space Race")))
                .await
                .unwrap();
        assert!(matches!(resp.report.files[0].status, FileStatus::Failed { .. }));
        assert_eq!(resp.report.files[1].status, FileStatus::Created);
        assert!(resp.message.starts_with("Error updating files (1 of 2 failed)"));

        let saved = CatalogStore::load(dir.path().join("games.json")).await.unwrap();
        assert!(saved.catalog().find("space-race").is_some());
    }

    #[tokio::test]
    async fn edited_base_url_beats_configured_one() {
        let dir = tempfile::tempdir().unwrap();
        let config = AdminConfig {
            catalog_path: dir.path().join("games.json"),
            site_root: dir.path().join("site"),
            base_url: Some("https://env.example".to_string()),
            ..AdminConfig::default()
        };
        let store = CatalogStore::new(config.catalog_path.clone(), sample_catalog());
        let state = AppState::new(config, store);

        let Html(html) = preview(State(state.clone()), Json(new_game_form("Space Race"))).await;
        assert!(html.contains("href=\"https://env.example/space-race/\""));

        put_base_url(
            State(state.clone()),
            Json(BaseUrlBody {
                base_url: "https://edited.example/".to_string(),
            }),
        )
        .await;
        let Html(html) = preview(State(state), Json(new_game_form("Space Race"))).await;
        assert!(html.contains("href=\"https://edited.example/space-race/\""));
        assert!(!html.contains("env.example"));
    }

    #[tokio::test]
    async fn write_everything_reports_each_file() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(dir.path());
        let Json(resp) =
            write_everything(State(state.clone()), body(None, new_game_form("Space Race")))
                .await
                .unwrap();
        // Game page, homepage, browse/new/popular, two indexes, two tag
        // pages, one category page, then the catalog.
        assert_eq!(resp.report.files.len(), 11);
        assert!(resp.message.starts_with("Updated 11 files"));
        assert!(dir.path().join("site/index.html").exists());
        assert!(dir.path().join("site/tag/puzzle/index.html").exists());
        assert!(dir.path().join("site/category/arcade/index.html").exists());
    }

    #[tokio::test]
    async fn download_catalog_is_attachment() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(dir.path());
        let resp = download_catalog(State(state)).await;
        assert_eq!(
            resp.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"games.json\""
        );
    }
}
