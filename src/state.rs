use std::sync::Arc;
use std::time::Duration;

use crate::{
    admin::AdminService,
    api::MarketplaceClient,
    error::AppError,
    estate::EstateService,
    notification::{NotificationSource, NotificationStore, UnreadCounter},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub notification_source: Arc<dyn NotificationSource>,
    pub notification_store: NotificationStore,
    pub unread_counter: UnreadCounter,
    pub admin_service: AdminService,
    pub estate_service: EstateService,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        client: MarketplaceClient,
        notification_source: Arc<dyn NotificationSource>,
        notification_store: NotificationStore,
        unread_counter: UnreadCounter,
    ) -> Self {
        Self {
            config,
            notification_source,
            notification_store,
            unread_counter,
            admin_service: AdminService::new(client.clone()),
            estate_service: EstateService::new(client),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub marketplace_api_url: String,
    pub admin_api_token: Option<String>,
    pub poll_interval: Duration,
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let marketplace_api_url = lookup("MARKETPLACE_API_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| AppError::Config("MARKETPLACE_API_URL must be set".to_string()))?
            .trim_end_matches('/')
            .to_string();

        let admin_api_token = lookup("ADMIN_API_TOKEN").filter(|token| !token.is_empty());

        let poll_interval_secs: u64 = lookup("POLL_INTERVAL_SECS")
            .unwrap_or_else(|| "5".to_string())
            .parse()
            .map_err(|_| AppError::Config("POLL_INTERVAL_SECS must be a number".to_string()))?;
        if poll_interval_secs == 0 {
            return Err(AppError::Config(
                "POLL_INTERVAL_SECS must be greater than zero".to_string(),
            ));
        }

        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|_| AppError::Config("PORT must be a valid port number".to_string()))?;

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            marketplace_api_url,
            admin_api_token,
            poll_interval: Duration::from_secs(poll_interval_secs),
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            cors_origins,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
