use parking_lot::RwLock;

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;

use services::inspection::InspectionController;

// Application state
pub struct AppState {
    pub config: config::Config,
    pub inspection: RwLock<InspectionController>,
}

impl AppState {
    pub fn new(config: config::Config) -> Self {
        Self {
            config,
            inspection: RwLock::new(InspectionController::new()),
        }
    }
}
