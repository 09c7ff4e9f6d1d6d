pub mod app;
pub mod client;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod queue;
pub mod storage;
pub mod ui;
pub mod state;

pub use app::router;
pub use config::Settings;
pub use state::AppState;
pub use storage::load_data;
