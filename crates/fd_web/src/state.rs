use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use fd_core::UserConfig;
use fd_pipeline::Pipeline;

use crate::rate_limit::RateLimiter;

pub struct AppState {
    pub config: Arc<RwLock<UserConfig>>,
    pub pipeline: Arc<Pipeline>,
    pub limiter: Mutex<RateLimiter>,
}
