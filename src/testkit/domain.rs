//! Builders for domain primitives used across tests.

use rust_decimal::Decimal;

use crate::domain::{Alert, CoinId, UserId};

/// Build an active alert for `coin` at `threshold`, owned by "user-1".
#[must_use]
pub fn alert(coin: &str, threshold: Decimal) -> Alert {
    alert_for("user-1", coin, threshold)
}

/// Build an active alert with an explicit owner.
#[must_use]
pub fn alert_for(user: &str, coin: &str, threshold: Decimal) -> Alert {
    Alert::try_new(UserId::new(user), CoinId::new(coin), threshold)
        .expect("test alert parameters must be valid")
}
