//! Bed Statistics
//!
//! Display-only occupancy figures served by the backend. Every field is
//! optional on the wire and defaults to zero.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::gateway::{Gateway, GatewayResult};

/// Backend endpoint serving [`BedStats`]
pub const BED_STATS_ENDPOINT: &str = "/api/beds/stats";

/// Counts for one bed type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BedTypeStats {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub available: u64,
}

/// Hospital-wide bed counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BedStats {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub available: u64,
    #[serde(default)]
    pub occupied: u64,
    #[serde(default)]
    pub cleaning: u64,
    #[serde(default)]
    pub maintenance: u64,
    #[serde(default)]
    pub by_type: BTreeMap<String, BedTypeStats>,
}

impl BedStats {
    /// Occupied share of all beds, 0.0 when there are none
    pub fn occupancy_percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.occupied as f64 / self.total as f64 * 100.0
        }
    }
}

/// Fetch the current bed statistics
pub async fn fetch_bed_stats(gateway: &Gateway) -> GatewayResult<BedStats> {
    let stats: BedStats = gateway.get_json(BED_STATS_ENDPOINT).await?;
    tracing::debug!(
        total = stats.total,
        available = stats.available,
        types = stats.by_type.len(),
        "Fetched bed stats"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_payload_defaults_to_zero() {
        let stats: BedStats = serde_json::from_str("{}").unwrap();
        assert_eq!(stats, BedStats::default());
        assert!(stats.by_type.is_empty());
        assert_eq!(stats.occupancy_percent(), 0.0);
    }

    #[test]
    fn test_partial_payload() {
        let stats: BedStats = serde_json::from_str(
            r#"{"total": 20, "occupied": 15, "byType": {"icu": {"total": 4}, "general": {"total": 16, "available": 5}}}"#,
        )
        .unwrap();

        assert_eq!(stats.total, 20);
        assert_eq!(stats.available, 0);
        assert_eq!(stats.by_type["icu"], BedTypeStats { total: 4, available: 0 });
        assert_eq!(stats.by_type["general"].available, 5);
        assert_eq!(stats.occupancy_percent(), 75.0);
    }

    #[tokio::test]
    async fn test_fetch_bed_stats() {
        let (gateway, transport) = crate::gateway::testing::gateway_replying(vec![
            serde_json::json!({"total": 12, "available": 3, "cleaning": 1}),
        ]);

        let stats = fetch_bed_stats(&gateway).await.unwrap();
        assert_eq!(stats.total, 12);
        assert_eq!(stats.cleaning, 1);
        assert_eq!(stats.maintenance, 0);
        assert!(transport.sent()[0].url.ends_with("/api/beds/stats"));
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(BedStats::default()).unwrap();
        assert!(value.get("byType").is_some());
        assert!(value.get("by_type").is_none());
    }
}
