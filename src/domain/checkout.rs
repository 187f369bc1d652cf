use serde::{Deserialize, Serialize};
use std::fmt;

/// The four linear checkout steps.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStep {
    #[default]
    Information,
    Shipping,
    Payment,
    Confirmed,
}

impl CheckoutStep {
    pub const ALL: [Self; 4] = [
        Self::Information,
        Self::Shipping,
        Self::Payment,
        Self::Confirmed,
    ];

    /// 1-based position shown in the step indicator.
    pub fn ordinal(self) -> u8 {
        match self {
            Self::Information => 1,
            Self::Shipping => 2,
            Self::Payment => 3,
            Self::Confirmed => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Information => "Information",
            Self::Shipping => "Shipping",
            Self::Payment => "Payment",
            Self::Confirmed => "Confirm",
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            Self::Information => Some(Self::Shipping),
            Self::Shipping => Some(Self::Payment),
            Self::Payment => Some(Self::Confirmed),
            Self::Confirmed => None,
        }
    }

    /// Only Shipping and Payment can go back. Confirmed is terminal.
    pub fn previous(self) -> Option<Self> {
        match self {
            Self::Shipping => Some(Self::Information),
            Self::Payment => Some(Self::Shipping),
            Self::Information | Self::Confirmed => None,
        }
    }
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Observable state of a checkout sequencer.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
pub struct CheckoutState {
    pub current_step: CheckoutStep,
    pub is_processing: bool,
    pub is_completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_are_linear() {
        let ordinals: Vec<u8> = CheckoutStep::ALL.iter().map(|s| s.ordinal()).collect();
        assert_eq!(ordinals, [1, 2, 3, 4]);
        for pair in CheckoutStep::ALL.windows(2) {
            assert_eq!(pair[0].next(), Some(pair[1]));
        }
        assert_eq!(CheckoutStep::Confirmed.next(), None);
    }

    #[test]
    fn test_back_only_from_middle_steps() {
        assert_eq!(CheckoutStep::Information.previous(), None);
        assert_eq!(CheckoutStep::Shipping.previous(), Some(CheckoutStep::Information));
        assert_eq!(CheckoutStep::Payment.previous(), Some(CheckoutStep::Shipping));
        assert_eq!(CheckoutStep::Confirmed.previous(), None);
    }
}
