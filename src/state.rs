use crate::config::Settings;
use crate::models::QueueData;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::{Mutex, Notify};

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<QueueData>>,
    pub settings: Arc<Settings>,
    /// Woken on every enqueue so long-polling receivers can retry.
    pub arrivals: Arc<Notify>,
}

impl AppState {
    pub fn new(settings: Settings, data: QueueData) -> Self {
        Self {
            data_path: settings.data_path.clone(),
            data: Arc::new(Mutex::new(data)),
            settings: Arc::new(settings),
            arrivals: Arc::new(Notify::new()),
        }
    }
}
