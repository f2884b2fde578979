use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::app::{AppContext, Result};
use crate::domain::UpdateReport;
use crate::store::{KvStore, TRENDING_MOVIES_KEY};
use crate::updater::run_update;

pub async fn update_handler(State(ctx): State<Arc<AppContext>>) -> Response {
    match run_update(&ctx).await {
        Ok(outcome) => {
            let report = UpdateReport::success(outcome.message(ctx.source.cache_policy()))
                .with_data(outcome.stored)
                .stamped();
            (StatusCode::OK, Json(report)).into_response()
        }
        Err(e) => {
            tracing::error!("Update failed: {}", e);
            let report = UpdateReport::failure("Failed to update movies", e).stamped();
            (StatusCode::INTERNAL_SERVER_ERROR, Json(report)).into_response()
        }
    }
}

pub async fn trending_handler(State(ctx): State<Arc<AppContext>>) -> Response {
    match cached_or_fresh(&ctx).await {
        Ok(Some(body)) => {
            (StatusCode::OK, [(header::CONTENT_TYPE, "application/json")], body).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "success": false,
                "message": "No trending movies data available",
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Serving trending movies failed: {}", e);
            let report = UpdateReport::failure("Failed to fetch trending movies", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(report)).into_response()
        }
    }
}

/// The stored snapshot verbatim. On a cold cache (no value, or an empty one),
/// sources that fill it on demand scrape now; the others yield `None`.
async fn cached_or_fresh(ctx: &AppContext) -> Result<Option<String>> {
    if let Some(raw) = ctx
        .store()?
        .get(TRENDING_MOVIES_KEY)?
        .filter(|raw| !raw.is_empty())
    {
        return Ok(Some(raw));
    }

    if !ctx.source.fills_cold_cache() {
        return Ok(None);
    }

    tracing::info!("Cache is empty, fetching {} now", ctx.source);
    let outcome = run_update(ctx).await?;
    Ok(Some(serde_json::to_string(&outcome.stored)?))
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::util::ServiceExt;

    use super::*;
    use crate::domain::Source;
    use crate::fetcher::testing::StaticFetcher;
    use crate::server::create_app;
    use crate::store::SqliteStore;

    const FLIXPATROL_PAGE: &str = r#"<html><body><div id="netflix-1"><table><tbody>
        <tr><td>1</td><td><a href="/title/rebel-moon-2023/"><div>Rebel Moon</div></a><span title="Netflix original"></span></td><td>812</td></tr>
        </tbody></table></div></body></html>"#;

    const TRAKT_PAGE: &str = r#"<html><body>
        <div class="grid-item"><div class="titles"><h3>Heat <span class="year">1995</span></h3><h4>12 people watching</h4></div></div>
        </body></html>"#;

    struct Harness {
        ctx: Arc<AppContext>,
        store: Arc<SqliteStore>,
        fetcher: Arc<StaticFetcher>,
    }

    fn harness(source: Source, fetcher: StaticFetcher) -> Harness {
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        let fetcher = Arc::new(fetcher);
        let ctx = Arc::new(AppContext::with_parts(
            source,
            fetcher.clone(),
            Some(store.clone()),
        ));
        Harness {
            ctx,
            store,
            fetcher,
        }
    }

    async fn get(ctx: Arc<AppContext>, uri: &str) -> (StatusCode, Response) {
        let request = Request::builder()
            .uri(uri)
            .header("origin", "https://example.com")
            .body(Body::empty())
            .unwrap();
        let response = create_app(ctx).oneshot(request).await.unwrap();
        (response.status(), response)
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_root_updates_and_reports() {
        let h = harness(Source::FlixPatrol, StaticFetcher::ok(FLIXPATROL_PAGE));

        let (status, response) = get(h.ctx.clone(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "*"
        );

        let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Successfully updated 1 movies");
        assert_eq!(json["data"][0]["title"], "Rebel Moon (2023)");
        assert_eq!(json["data"][0]["isOriginal"], true);
        assert_eq!(json["data"][0]["points"], 812);
        assert!(json["timestamp"].is_string());

        assert!(h.store.get(TRENDING_MOVIES_KEY).unwrap().is_some());
    }

    #[tokio::test]
    async fn test_root_failure_is_500_envelope() {
        let h = harness(Source::FlixPatrol, StaticFetcher::failing(403));

        let (status, response) = get(h.ctx.clone(), "/").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Failed to update movies");
        assert_eq!(json["error"], "HTTP error! status: 403");
        assert!(json["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_api_echoes_stored_json_verbatim() {
        let h = harness(Source::Trakt, StaticFetcher::ok(TRAKT_PAGE));
        let stored = r#"[ {"title":"Stored As Is","watchers":3} ]"#;
        h.store.put(TRENDING_MOVIES_KEY, stored).unwrap();

        let (status, response) = get(h.ctx.clone(), "/api/trending-movies").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "application/json");
        assert_eq!(body_text(response).await, stored);
        assert_eq!(h.fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_api_404_only_when_empty() {
        let h = harness(Source::Trakt, StaticFetcher::ok(TRAKT_PAGE));

        let (status, response) = get(h.ctx.clone(), "/api/trending-movies").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(h.fetcher.calls(), 0);

        let (status, _) = get(h.ctx.clone(), "/").await;
        assert_eq!(status, StatusCode::OK);

        let (status, response) = get(h.ctx.clone(), "/api/trending-movies").await;
        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json[0]["title"], "Heat (1995)");
        assert_eq!(json[0]["watchers"], 12);
    }

    #[tokio::test]
    async fn test_api_fills_cold_cache_for_flixpatrol() {
        let h = harness(Source::FlixPatrol, StaticFetcher::ok(FLIXPATROL_PAGE));

        let (status, response) = get(h.ctx.clone(), "/api/trending").await;
        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json[0]["platform"], "netflix");
        assert_eq!(h.fetcher.calls(), 1);

        let (status, _) = get(h.ctx.clone(), "/api/trending").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(h.fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn test_api_empty_stored_value_counts_as_cold() {
        let h = harness(Source::FlixPatrol, StaticFetcher::ok(FLIXPATROL_PAGE));
        h.store.put(TRENDING_MOVIES_KEY, "").unwrap();

        let (status, response) = get(h.ctx.clone(), "/api/trending").await;
        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json[0]["title"], "Rebel Moon (2023)");
        assert_eq!(h.fetcher.calls(), 1);

        let h = harness(Source::Trakt, StaticFetcher::ok(TRAKT_PAGE));
        h.store.put(TRENDING_MOVIES_KEY, "").unwrap();

        let (status, _) = get(h.ctx.clone(), "/api/trending-movies").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(h.fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_root_corrupt_snapshot_is_500() {
        let h = harness(Source::Trakt, StaticFetcher::ok(TRAKT_PAGE));
        h.store.put(TRENDING_MOVIES_KEY, "{corrupt").unwrap();

        let (status, response) = get(h.ctx.clone(), "/").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["message"], "Failed to update movies");
        assert!(json["error"]
            .as_str()
            .is_some_and(|e| e.starts_with("Serialization error")));
        assert_eq!(
            h.store.get(TRENDING_MOVIES_KEY).unwrap(),
            Some("{corrupt".into())
        );
    }

    #[tokio::test]
    async fn test_api_cold_cache_fetch_failure_is_500() {
        let h = harness(Source::FlixPatrol, StaticFetcher::failing(500));

        let (status, response) = get(h.ctx.clone(), "/api/trending").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["message"], "Failed to fetch trending movies");
        assert!(json.get("timestamp").is_none());
    }

    #[tokio::test]
    async fn test_missing_store_is_500() {
        let ctx = Arc::new(AppContext::with_parts(
            Source::Trakt,
            Arc::new(StaticFetcher::ok(TRAKT_PAGE)),
            None,
        ));

        let (status, response) = get(ctx.clone(), "/api/trending-movies").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["error"], "KV namespace TRENDING_MOVIES is not configured");

        let (status, _) = get(ctx, "/").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_api_route_follows_source() {
        let h = harness(Source::Trakt, StaticFetcher::ok(TRAKT_PAGE));
        let (status, _) = get(h.ctx.clone(), "/api/trending").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let h = harness(Source::FlixPatrol, StaticFetcher::ok(FLIXPATROL_PAGE));
        let (status, _) = get(h.ctx.clone(), "/api/trending-movies").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
