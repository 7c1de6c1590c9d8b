use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod shared_repos;
pub mod telemetry;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, middlewares, repositories, routes};
pub use infrastructure::{auth, db, payments, utils};

use auth::session::SessionService;
use repositories::payment_gateway::PaymentGateway;
use settings::AppConfig;
use shared_repos::SharedRepositories;
use use_cases::{
    blog::BlogPostHandler,
    checkout::CheckoutHandler,
    directories::DirectoryHandler,
    launch_weeks::LaunchWeekHandler,
    users::UserHandler,
};

pub struct AppState {
    pub config: AppConfig,
    pub session_service: SessionService,
    pub blog_handler: BlogPostHandler,
    pub directory_handler: DirectoryHandler,
    pub launch_week_handler: LaunchWeekHandler,
    pub checkout_handler: CheckoutHandler,
    pub user_handler: UserHandler,
}

impl AppState {
    pub fn new(config: AppConfig, repos: SharedRepositories, gateway: Arc<dyn PaymentGateway>) -> Self {
        let session_service = SessionService::new(&config);
        let checkout_handler = CheckoutHandler::new(
            repos.launch_week_repo.clone(),
            gateway,
            &config.public_base_url,
        );

        AppState {
            session_service,
            blog_handler: BlogPostHandler::new(repos.blog_post_repo),
            directory_handler: DirectoryHandler::new(repos.directory_repo),
            launch_week_handler: LaunchWeekHandler::new(repos.launch_week_repo),
            checkout_handler,
            user_handler: UserHandler::new(repos.user_repo),
            config,
        }
    }
}
