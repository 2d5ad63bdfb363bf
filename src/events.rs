use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Visibility {
    Visible,
    Hidden,
}

impl Visibility {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "visible" => Some(Visibility::Visible),
            "hidden" => Some(Visibility::Hidden),
            _ => None,
        }
    }
}

/// Everything the page can tell the board.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    FilterChanged(String),
    RefreshRequested,
    TimerTick,
    VisibilityChanged(Visibility),
    /// Detail container id, e.g. `p-123-items`.
    ToggleDetails(String),
    DismissAlert(u64),
    RegionSelected(String),
}

/// Notifications fired on the freight input after its value is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEvent {
    Input,
    Change,
}

impl FieldEvent {
    /// Name pushed to the page over `/events`.
    pub fn event_name(self) -> &'static str {
        match self {
            FieldEvent::Input => "freteInput",
            FieldEvent::Change => "freteChange",
        }
    }
}

pub const ORDERS_UPDATED: &str = "ordersUpdated";
pub const FREIGHT_UPDATED: &str = "freightUpdated";
