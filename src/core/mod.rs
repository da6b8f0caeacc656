pub mod autoscaler;
pub mod scaler;

pub use crate::domain::model::{Offer, ScaleAction, ScaleDecision, ThroughputBounds};
pub use crate::domain::ports::{ConfigProvider, ThroughputClient};
pub use crate::utils::error::Result;
