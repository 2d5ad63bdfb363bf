//! Element ids the widgets bind to, and the set of ids a page actually mounts.

use std::collections::BTreeSet;

use crate::error::MountError;

pub const ORDERS_TABLE_BODY: &str = "tbody-pedidos";
pub const REFRESH_BUTTON: &str = "btn-refresh";
pub const LAST_REFRESH: &str = "last-refresh";
pub const STATUS_FILTER: &str = "status-filter";
pub const ALERT_AREA: &str = "alert-area";

pub const REGION_SELECT: &str = "ufSelect";
pub const FREIGHT_FIELD: &str = "frete";
pub const FREIGHT_MESSAGE: &str = "ufFreteMsg";

pub const ALL_IDS: [&str; 8] = [
    ORDERS_TABLE_BODY,
    REFRESH_BUTTON,
    LAST_REFRESH,
    STATUS_FILTER,
    ALERT_AREA,
    REGION_SELECT,
    FREIGHT_FIELD,
    FREIGHT_MESSAGE,
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    ids: BTreeSet<String>,
}

impl Document {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// The page served by this crate: every element present.
    pub fn standard() -> Self {
        Self::new(ALL_IDS)
    }

    pub fn without(mut self, id: &str) -> Self {
        self.ids.remove(id);
        self
    }

    pub fn has(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn require(&self, id: &'static str) -> Result<(), MountError> {
        if self.has(id) {
            Ok(())
        } else {
            Err(MountError::MissingElement(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_reports_missing_id() {
        let doc = Document::standard().without(STATUS_FILTER);
        assert!(doc.require(ORDERS_TABLE_BODY).is_ok());
        assert_eq!(
            doc.require(STATUS_FILTER),
            Err(MountError::MissingElement(STATUS_FILTER))
        );
    }
}
