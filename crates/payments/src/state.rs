use serde::{Deserialize, Serialize};

/// The state of a payment.
///
/// ```text
/// New ──(request)──► Requested ──┬──► Successful
///                                └──► Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentState {
    #[default]
    New,
    Requested,
    Successful,
    Failed,
}

impl PaymentState {
    pub fn can_request(&self) -> bool {
        matches!(self, PaymentState::New)
    }

    /// Returns true while the processor outcome is pending.
    pub fn can_settle(&self) -> bool {
        matches!(self, PaymentState::Requested)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PaymentState::Successful | PaymentState::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentState::New => "NEW",
            PaymentState::Requested => "REQUESTED",
            PaymentState::Successful => "SUCCESSFUL",
            PaymentState::Failed => "FAILED",
        }
    }
}

impl std::fmt::Display for PaymentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
