use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{info, warn};

use fd_core::ConfigUpdate;
use fd_pipeline::RunOutcome;

use crate::AppState;

/// Rejection text for rate-limited manual triggers.
pub const TOO_MANY_REQUESTS: &str = "Muitas requisições! Por favor, tente novamente mais tarde.";

pub async fn update_config(
    State(state): State<Arc<AppState>>,
    Json(update): Json<ConfigUpdate>,
) -> impl IntoResponse {
    let mut config = state.config.write().await;
    config.apply(&update);
    info!(
        "config updated: hour={} numberOfArticles={}",
        config.hour, config.number_of_articles
    );
    Json(json!({ "message": "Configurações atualizadas com sucesso" }))
}

pub async fn get_config(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.config.read().await.clone())
}

pub async fn scrape_and_email(State(state): State<Arc<AppState>>) -> Response {
    if !state.limiter.lock().await.try_acquire() {
        warn!("manual trigger rejected by rate limiter");
        return (StatusCode::TOO_MANY_REQUESTS, TOO_MANY_REQUESTS).into_response();
    }

    match state.pipeline.run().await {
        RunOutcome::Delivered => {
            Json(json!({ "message": "Scraping e envio de email concluídos" })).into_response()
        }
        RunOutcome::NoData => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "Erro no scraping" })),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use crate::rate_limit::RateLimiter;
    use crate::{create_app, AppState};
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use fd_core::{Error, Headline, Result, UserConfig};
    use fd_pipeline::{Notifier, Pipeline};
    use fd_scrapers::FrontPageScraper;
    use serde_json::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::{Mutex, RwLock};
    use tower::ServiceExt;

    struct StubScraper {
        headlines: Vec<Headline>,
    }

    #[async_trait]
    impl FrontPageScraper for StubScraper {
        fn source(&self) -> &str {
            "stub"
        }

        async fn front_page(&self, limit: usize) -> Result<Vec<Headline>> {
            if self.headlines.is_empty() {
                return Err(Error::Scraping("front page empty".to_string()));
            }
            Ok(self.headlines.iter().take(limit).cloned().collect())
        }
    }

    struct CountingNotifier {
        sent: AtomicUsize,
    }

    #[async_trait]
    impl Notifier for CountingNotifier {
        async fn notify(&self, _headlines: &[Headline]) -> Result<()> {
            self.sent.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    async fn test_app(headline_count: usize, max_requests: usize) -> (Router, Arc<CountingNotifier>) {
        let headlines = (1..=headline_count)
            .map(|i| Headline {
                title: format!("Manchete {}", i),
                link: format!("https://www.folha.uol.com.br/{}.shtml", i),
            })
            .collect();
        let scraper = Arc::new(StubScraper { headlines });
        let notifier = Arc::new(CountingNotifier {
            sent: AtomicUsize::new(0),
        });
        let config = Arc::new(RwLock::new(UserConfig::default()));

        let pipeline = Arc::new(Pipeline::new(
            scraper,
            notifier.clone() as Arc<dyn Notifier>,
            Arc::clone(&config),
        ));
        let state = AppState {
            config,
            pipeline,
            limiter: Mutex::new(RateLimiter::new(max_requests, Duration::from_secs(60))),
        };
        (create_app(state).await, notifier)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_config(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/config")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn get_config_returns_the_defaults() {
        let (app, _) = test_app(3, 5).await;

        let response = app.oneshot(get("/config")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["hour"], 8);
        assert_eq!(body["numberOfArticles"], 5);
    }

    #[tokio::test]
    async fn post_config_applies_valid_fields() {
        let (app, _) = test_app(3, 5).await;

        let response = app
            .clone()
            .oneshot(post_config(r#"{"hour": 14, "numberOfArticles": 3}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Configurações atualizadas com sucesso");

        let body = body_json(app.oneshot(get("/config")).await.unwrap()).await;
        assert_eq!(body["hour"], 14);
        assert_eq!(body["numberOfArticles"], 3);
    }

    #[tokio::test]
    async fn post_config_silently_ignores_invalid_fields() {
        let (app, _) = test_app(3, 5).await;

        let response = app
            .clone()
            .oneshot(post_config(r#"{"hour": 30, "numberOfArticles": 0}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Configurações atualizadas com sucesso");

        let body = body_json(app.oneshot(get("/config")).await.unwrap()).await;
        assert_eq!(body["hour"], 8);
        assert_eq!(body["numberOfArticles"], 5);
    }

    #[tokio::test]
    async fn post_config_rejected_hour_then_accepted_hour() {
        let (app, _) = test_app(3, 5).await;

        app.clone()
            .oneshot(post_config(r#"{"hour": 30}"#))
            .await
            .unwrap();
        let body = body_json(app.clone().oneshot(get("/config")).await.unwrap()).await;
        assert_eq!(body["hour"], 8);

        app.clone()
            .oneshot(post_config(r#"{"hour": 14}"#))
            .await
            .unwrap();
        let body = body_json(app.oneshot(get("/config")).await.unwrap()).await;
        assert_eq!(body["hour"], 14);
    }

    #[tokio::test]
    async fn manual_trigger_delivers_and_notifies_once() {
        let (app, notifier) = test_app(3, 5).await;

        let response = app.oneshot(get("/scrape-and-email")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Scraping e envio de email concluídos");
        assert_eq!(notifier.sent.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn manual_trigger_with_no_data_returns_500_without_notifying() {
        let (app, notifier) = test_app(0, 5).await;

        let response = app.oneshot(get("/scrape-and-email")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Erro no scraping");
        assert_eq!(notifier.sent.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn manual_trigger_is_rate_limited() {
        let (app, _) = test_app(3, 5).await;

        for _ in 0..5 {
            let response = app
                .clone()
                .oneshot(get("/scrape-and-email"))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app.oneshot(get("/scrape-and-email")).await.unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], super::TOO_MANY_REQUESTS.as_bytes());
    }
}
