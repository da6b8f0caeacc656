use crate::utils::error::{AutoscaleError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleAction {
    Up,
    Down,
}

impl ScaleAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScaleAction::Up => "Up",
            ScaleAction::Down => "Down",
        }
    }
}

impl FromStr for ScaleAction {
    type Err = AutoscaleError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("up") {
            Ok(ScaleAction::Up)
        } else if s.eq_ignore_ascii_case("down") {
            Ok(ScaleAction::Down)
        } else {
            Err(AutoscaleError::InvalidAction {
                value: s.to_string(),
            })
        }
    }
}

impl fmt::Display for ScaleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 允許的 RU/s 範圍（含兩端）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThroughputBounds {
    pub min: u32,
    pub max: u32,
}

impl ThroughputBounds {
    pub fn new(min: u32, max: u32) -> Result<Self> {
        if min > max {
            return Err(AutoscaleError::ConfigValidationError {
                field: "throughput".to_string(),
                message: format!(
                    "min_authorized_ru ({}) must not exceed max_authorized_ru ({})",
                    min, max
                ),
            });
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, value: u32) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleDecision {
    Adjust { from: u32, to: u32 },
    MaxReached,
    MinReached,
}

/// Cosmos DB offer resource.
///
/// The raw JSON is kept so that a replace sends back every field the service
/// returned; only `content.offerThroughput` is ever rewritten.
#[derive(Debug, Clone, PartialEq)]
pub struct Offer {
    raw: serde_json::Value,
}

impl Offer {
    pub fn from_json(raw: serde_json::Value) -> Result<Self> {
        if !raw.is_object() {
            return Err(AutoscaleError::ProcessingError {
                message: "Offer resource is not a JSON object".to_string(),
            });
        }
        Ok(Self { raw })
    }

    pub fn rid(&self) -> Option<&str> {
        self.raw.get("_rid").and_then(|v| v.as_str())
    }

    pub fn resource_link(&self) -> Option<&str> {
        self.raw.get("resource").and_then(|v| v.as_str())
    }

    pub fn offer_version(&self) -> Option<&str> {
        self.raw.get("offerVersion").and_then(|v| v.as_str())
    }

    /// 手動佈建的 RU/s；autoscale (autopilot) offer 沒有這個欄位
    pub fn throughput(&self) -> Result<u32> {
        let value = self
            .raw
            .pointer("/content/offerThroughput")
            .ok_or_else(|| AutoscaleError::ProcessingError {
                message: format!(
                    "Offer {} has no manual offerThroughput (version {})",
                    self.rid().unwrap_or("?"),
                    self.offer_version().unwrap_or("unknown")
                ),
            })?;

        value
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| AutoscaleError::ProcessingError {
                message: format!("offerThroughput is not a valid RU value: {}", value),
            })
    }

    /// 回傳只改了 offerThroughput 的副本
    pub fn with_throughput(&self, throughput: u32) -> Result<Self> {
        // 先確認是手動 throughput 的 offer
        self.throughput()?;

        let mut raw = self.raw.clone();
        if let Some(content) = raw.get_mut("content").and_then(|c| c.as_object_mut()) {
            content.insert(
                "offerThroughput".to_string(),
                serde_json::Value::Number(throughput.into()),
            );
        }
        Ok(Self { raw })
    }

    pub fn as_json(&self) -> &serde_json::Value {
        &self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_offer() -> serde_json::Value {
        json!({
            "id": "Xzz6",
            "_rid": "Xzz6",
            "_self": "offers/Xzz6/",
            "resource": "dbs/Jq8mAA==/colls/Jq8mAIA2rgA=/",
            "offerResourceId": "Jq8mAIA2rgA=",
            "offerType": "Invalid",
            "offerVersion": "V2",
            "content": {
                "offerThroughput": 400,
                "offerIsRUPerMinuteThroughputEnabled": false
            },
            "_etag": "\"00000600-0000-0000-0000-5c0e8a7f0000\"",
            "_ts": 1544456831
        })
    }

    #[test]
    fn test_action_parse_is_case_insensitive() {
        assert_eq!("Up".parse::<ScaleAction>().unwrap(), ScaleAction::Up);
        assert_eq!("UP".parse::<ScaleAction>().unwrap(), ScaleAction::Up);
        assert_eq!("down".parse::<ScaleAction>().unwrap(), ScaleAction::Down);
        assert_eq!("dOwN".parse::<ScaleAction>().unwrap(), ScaleAction::Down);
    }

    #[test]
    fn test_action_parse_rejects_unknown() {
        for bad in ["", " up", "left", "Upp", "1"] {
            let err = bad.parse::<ScaleAction>().unwrap_err();
            assert!(matches!(err, AutoscaleError::InvalidAction { .. }), "{bad:?}");
        }
    }

    #[test]
    fn test_bounds_reject_inverted_range() {
        assert!(ThroughputBounds::new(400, 10_000).is_ok());
        assert!(ThroughputBounds::new(400, 400).is_ok());
        assert!(ThroughputBounds::new(1000, 400).is_err());
    }

    #[test]
    fn test_offer_throughput() {
        let offer = Offer::from_json(sample_offer()).unwrap();
        assert_eq!(offer.throughput().unwrap(), 400);
        assert_eq!(offer.rid(), Some("Xzz6"));
        assert_eq!(offer.resource_link(), Some("dbs/Jq8mAA==/colls/Jq8mAIA2rgA=/"));
    }

    #[test]
    fn test_with_throughput_keeps_other_fields() {
        let offer = Offer::from_json(sample_offer()).unwrap();
        let updated = offer.with_throughput(800).unwrap();

        assert_eq!(updated.throughput().unwrap(), 800);
        assert_eq!(updated.as_json()["_etag"], offer.as_json()["_etag"]);
        assert_eq!(
            updated.as_json()["content"]["offerIsRUPerMinuteThroughputEnabled"],
            json!(false)
        );
        // 原本的 offer 不受影響
        assert_eq!(offer.throughput().unwrap(), 400);
    }

    #[test]
    fn test_autopilot_offer_is_rejected() {
        let offer = Offer::from_json(json!({
            "_rid": "Ab12",
            "offerVersion": "V2",
            "content": { "offerAutopilotSettings": { "maxThroughput": 4000 } }
        }))
        .unwrap();

        assert!(matches!(
            offer.throughput(),
            Err(AutoscaleError::ProcessingError { .. })
        ));
        assert!(offer.with_throughput(800).is_err());
    }
}
