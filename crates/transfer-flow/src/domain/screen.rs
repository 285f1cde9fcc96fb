//! Screen identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FlowError;

/// One full-view state of the flow. Exactly one is active at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenId {
    #[default]
    Home,
    Recipient,
    Amount,
    Auth,
    Success,
}

impl ScreenId {
    /// All screens in flow order.
    pub const ALL: [ScreenId; 5] = [
        ScreenId::Home,
        ScreenId::Recipient,
        ScreenId::Amount,
        ScreenId::Auth,
        ScreenId::Success,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScreenId::Home => "home",
            ScreenId::Recipient => "recipient",
            ScreenId::Amount => "amount",
            ScreenId::Auth => "auth",
            ScreenId::Success => "success",
        }
    }

    /// Title shown in the screen header.
    pub fn title(&self) -> &'static str {
        match self {
            ScreenId::Home => "Home",
            ScreenId::Recipient => "Choose Recipient",
            ScreenId::Amount => "Transfer Amount",
            ScreenId::Auth => "Authenticate",
            ScreenId::Success => "Transfer Complete",
        }
    }

    /// Explicit target of the back action. Home has none.
    pub fn back_target(&self) -> Option<ScreenId> {
        match self {
            ScreenId::Home => None,
            ScreenId::Recipient => Some(ScreenId::Home),
            ScreenId::Amount => Some(ScreenId::Recipient),
            ScreenId::Auth => Some(ScreenId::Amount),
            ScreenId::Success => Some(ScreenId::Home),
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts `"amount"` as well as the DOM-style `"amount-screen"`, ignoring case.
impl FromStr for ScreenId {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let name = normalized
            .strip_suffix("-screen")
            .unwrap_or(normalized.as_str());

        ScreenId::ALL
            .into_iter()
            .find(|id| id.as_str() == name)
            .ok_or_else(|| FlowError::InvalidScreenId { raw: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for id in ScreenId::ALL {
            assert_eq!(id.as_str().parse::<ScreenId>().unwrap(), id);
            assert_eq!(id.to_string().parse::<ScreenId>().unwrap(), id);
        }
    }

    #[test]
    fn test_parse_dom_style_ids() {
        assert_eq!("home-screen".parse::<ScreenId>().unwrap(), ScreenId::Home);
        assert_eq!("AUTH-screen".parse::<ScreenId>().unwrap(), ScreenId::Auth);
        assert_eq!(" amount ".parse::<ScreenId>().unwrap(), ScreenId::Amount);
    }

    #[test]
    fn test_parse_unknown_is_explicit_error() {
        let err = "settings".parse::<ScreenId>().unwrap_err();
        assert_eq!(
            err,
            FlowError::InvalidScreenId {
                raw: "settings".to_string()
            }
        );
        assert!("".parse::<ScreenId>().is_err());
        assert!("-screen".parse::<ScreenId>().is_err());
    }

    #[test]
    fn test_back_targets_never_loop_on_self() {
        for id in ScreenId::ALL {
            assert_ne!(id.back_target(), Some(id));
        }
        assert_eq!(ScreenId::Home.back_target(), None);
        assert_eq!(ScreenId::Success.back_target(), Some(ScreenId::Home));
    }
}
