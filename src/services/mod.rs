pub mod alerts;
pub mod analysis;
pub mod cache;
pub mod features;
pub mod indicators;
pub mod model;
pub mod predictor;
pub mod summary;
pub mod trend;

pub use alerts::AlertService;
pub use cache::Cache;
pub use predictor::StockPredictor;
