use sha2::{Digest, Sha256};

use crate::models::Order;

/// Digest of the ordered `(number, revision)` pairs of an order list.
///
/// Only used to skip re-rendering when a poll returns the same list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn of<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut hasher = Sha256::new();
        for (number, revision) in pairs {
            // unit/record separators keep ("1", "23") apart from ("12", "3")
            hasher.update(number.as_bytes());
            hasher.update([0x1f]);
            hasher.update(revision.as_bytes());
            hasher.update([0x1e]);
        }
        Fingerprint(format!("{:x}", hasher.finalize()))
    }

    pub fn of_orders(orders: &[Order]) -> Self {
        Self::of(orders.iter().map(|o| (o.number.as_str(), o.revision.as_str())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
