use std::time::Duration;

/// Marketplace-wide parameters, fixed at backend open time.
///
/// The auction window is a *default*: individual applications may override
/// it at creation, since operators routinely shorten it in test and staging
/// environments. The fee is the fixed unit amount added to an application's
/// `revenue_collected` each time a bank first commits to it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketConfig {
    /// How long applications accept offers when no explicit window is given
    #[cfg_attr(feature = "serde", serde(with = "humantime_serde"))]
    pub default_window: Duration,
    /// The lead fee collected per committing bank
    pub unit_fee: u64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            default_window: Duration::from_secs(48 * 60 * 60),
            unit_fee: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MarketConfig;
    use std::time::Duration;

    #[test]
    fn default_window_is_48_hours() {
        let config = MarketConfig::default();
        assert_eq!(config.default_window, Duration::from_secs(172_800));
    }

    #[test]
    fn window_serializes_as_humantime() {
        let json = serde_json::to_value(MarketConfig::default()).unwrap();
        assert_eq!(json["default_window"], "2days");

        let parsed: MarketConfig =
            serde_json::from_value(serde_json::json!({ "default_window": "5m", "unit_fee": 1 }))
                .unwrap();
        assert_eq!(parsed.default_window, Duration::from_secs(300));
    }
}
