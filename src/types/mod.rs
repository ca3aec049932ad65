pub mod alert;
pub mod analysis;
pub mod market;
pub mod prediction;

pub use alert::*;
pub use analysis::*;
pub use market::*;
pub use prediction::*;
