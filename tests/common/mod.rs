#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use slug_shortener::application::services::{ServiceConfig, UrlService};
use slug_shortener::infrastructure::cache::MemoryCache;
use slug_shortener::infrastructure::persistence::MemoryLinkRepository;
use slug_shortener::routes::app_router;
use slug_shortener::state::AppState;
use slug_shortener::utils::slug_generator::{GeneratorError, RandomSlugGenerator, SlugGenerator};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const BASE_URL: &str = "http://sho.rt";

/// State over in-memory backends, with handles kept for inspection.
pub struct TestContext {
    pub state: AppState,
    pub repo: Arc<MemoryLinkRepository>,
    pub cache: Arc<MemoryCache>,
}

pub fn create_test_context() -> TestContext {
    create_test_context_with(
        Arc::new(RandomSlugGenerator::new(10)),
        ServiceConfig::default(),
    )
}

pub fn create_test_context_with(
    generator: Arc<dyn SlugGenerator>,
    config: ServiceConfig,
) -> TestContext {
    let repo = Arc::new(MemoryLinkRepository::new());
    let cache = Arc::new(MemoryCache::new());

    let url_service = Arc::new(UrlService::new(
        repo.clone(),
        cache.clone(),
        generator,
        config,
    ));

    let state = AppState::new(url_service, repo.clone(), cache.clone(), BASE_URL);

    TestContext { state, repo, cache }
}

pub fn create_test_server(state: AppState) -> TestServer {
    create_test_server_with_timeout(state, Duration::from_secs(5))
}

pub fn create_test_server_with_timeout(state: AppState, request_timeout: Duration) -> TestServer {
    let app = Router::new().fallback_service(app_router(state, request_timeout));
    TestServer::new(app).unwrap()
}

/// Generator that replays a script, then repeats `fallback` forever.
pub struct ScriptedSlugGenerator {
    script: Mutex<VecDeque<String>>,
    fallback: String,
    calls: AtomicUsize,
}

impl ScriptedSlugGenerator {
    pub fn new(script: &[&str], fallback: &str) -> Self {
        Self {
            script: Mutex::new(script.iter().map(|s| s.to_string()).collect()),
            fallback: fallback.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn always(slug: &str) -> Self {
        Self::new(&[], slug)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SlugGenerator for ScriptedSlugGenerator {
    fn generate(&self) -> Result<String, GeneratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        Ok(next.unwrap_or_else(|| self.fallback.clone()))
    }
}
