use nyayadoot_types::{DEFAULT_ERROR_MESSAGE, DEFAULT_POPUP_THRESHOLD};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PROMO_MESSAGE: &str =
    "For better assistance, please visit http://82.112.226.107/vaadvivaad/";

/// Presentation constants for the chat controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Show the promotional interstitial every this many user messages.
    /// Zero disables it.
    pub popup_threshold: u32,
    /// Assistant text appended when a turn fails
    pub error_message: String,
    /// Text of the promotional interstitial
    pub promo_message: String,
    /// Reset the user message count when switching to a stored session
    pub reset_count_on_select: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            popup_threshold: DEFAULT_POPUP_THRESHOLD,
            error_message: DEFAULT_ERROR_MESSAGE.to_string(),
            promo_message: DEFAULT_PROMO_MESSAGE.to_string(),
            reset_count_on_select: false,
        }
    }
}

impl ChatConfig {
    /// Whether reaching `count` user messages triggers the interstitial
    pub fn triggers_popup(&self, count: u32) -> bool {
        self.popup_threshold > 0 && count > 0 && count % self.popup_threshold == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_cadence() {
        let config = ChatConfig::default();
        let hits: Vec<u32> = (0..=20).filter(|n| config.triggers_popup(*n)).collect();
        assert_eq!(hits, vec![5, 10, 15, 20]);
    }

    #[test]
    fn test_zero_threshold_disables_popup() {
        let config = ChatConfig {
            popup_threshold: 0,
            ..ChatConfig::default()
        };
        assert!((0..50).all(|n| !config.triggers_popup(n)));
    }
}
