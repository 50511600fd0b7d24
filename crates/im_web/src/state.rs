use std::sync::Arc;
use im_scraper::NewsManager;

pub struct AppState {
    pub manager: Arc<NewsManager>,
}
