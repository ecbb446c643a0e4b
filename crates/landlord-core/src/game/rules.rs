use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_BID: u8 = 3;

/// Table rules the validator enforces. Deserializable so hosts can load them from config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default = "default_max_bid")]
    pub max_bid: u8,
    /// Multiply the stake for every bomb or rocket played.
    #[serde(default = "default_true")]
    pub bombs_double: bool,
    /// Multiply the stake when the losing side never got a play in.
    #[serde(default = "default_true")]
    pub spring_doubles: bool,
}

impl RulesConfig {
    pub fn normalized(mut self) -> Self {
        self.max_bid = self.max_bid.max(1);
        self
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            max_bid: DEFAULT_MAX_BID,
            bombs_double: true,
            spring_doubles: true,
        }
    }
}

fn default_max_bid() -> u8 {
    DEFAULT_MAX_BID
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::RulesConfig;

    #[test]
    fn missing_fields_take_defaults() {
        let rules: RulesConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(rules, RulesConfig::default());
    }

    #[test]
    fn zero_max_bid_is_normalized() {
        let rules: RulesConfig = serde_json::from_str(r#"{"max_bid": 0}"#).unwrap();
        assert_eq!(rules.normalized().max_bid, 1);
    }
}
