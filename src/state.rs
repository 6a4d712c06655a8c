use crate::config::settings::AppConfig;
use crate::infrastructure::vod::client::VodClient;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub vod: VodClient,
}

impl AppState {
    pub fn new(config: AppConfig, vod: VodClient) -> Self {
        Self { config, vod }
    }
}
