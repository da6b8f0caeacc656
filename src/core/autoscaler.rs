use crate::core::scaler::decide;
use crate::domain::model::{ScaleAction, ScaleDecision, ThroughputBounds};
use crate::domain::ports::ThroughputClient;
use crate::utils::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleOutcome {
    pub action: ScaleAction,
    pub decision: ScaleDecision,
    /// 是否真的寫回了新的 throughput
    pub applied: bool,
}

impl ScaleOutcome {
    /// Plain-text response body. `requested` is the action as the caller typed it.
    pub fn message(&self, requested: &str) -> String {
        match self.decision {
            ScaleDecision::MaxReached => "Max Throughput reached".to_string(),
            ScaleDecision::MinReached => "Min Throughput reached".to_string(),
            ScaleDecision::Adjust { .. } => format!("Hello, {}", requested),
        }
    }
}

pub struct Autoscaler<C: ThroughputClient> {
    client: C,
    bounds: ThroughputBounds,
}

impl<C: ThroughputClient> Autoscaler<C> {
    pub fn new(client: C, bounds: ThroughputBounds) -> Self {
        Self { client, bounds }
    }

    pub async fn current_throughput(&self) -> Result<u32> {
        self.client.read_offer().await?.throughput()
    }

    /// 只計算，不寫回
    pub async fn plan(&self, action: ScaleAction) -> Result<ScaleOutcome> {
        let offer = self.client.read_offer().await?;
        let current = offer.throughput()?;
        let decision = decide(action, current, self.bounds);

        tracing::debug!(
            "Planned {} from {} RU/s within [{}, {}]: {:?}",
            action,
            current,
            self.bounds.min,
            self.bounds.max,
            decision
        );

        Ok(ScaleOutcome {
            action,
            decision,
            applied: false,
        })
    }

    pub async fn run(&self, action: ScaleAction) -> Result<ScaleOutcome> {
        let offer = self.client.read_offer().await?;
        let current = offer.throughput()?;
        let decision = decide(action, current, self.bounds);

        let applied = match decision {
            ScaleDecision::Adjust { from, to } => {
                self.client.replace_throughput(&offer, to).await?;
                tracing::info!("🔧 Scaled {}: {} -> {} RU/s", action, from, to);
                true
            }
            ScaleDecision::MaxReached => {
                tracing::info!("⛔ Max throughput reached at {} RU/s", current);
                false
            }
            ScaleDecision::MinReached => {
                tracing::info!("⛔ Min throughput reached at {} RU/s", current);
                false
            }
        };

        Ok(ScaleOutcome {
            action,
            decision,
            applied,
        })
    }
}
