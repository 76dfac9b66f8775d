use eventsphere_types::models::{Event, NewAccount, NewEvent, NewRegistration};

use crate::StoreResult;

/// The storage capability shared by both persistence modes.
///
/// Methods are blocking; async callers run them on the blocking pool.
pub trait Store: Send + Sync {
    /// All events, ordered by date, then time, then id.
    fn list_events(&self) -> StoreResult<Vec<Event>>;

    /// Insert `catalog` if the store holds no events. Returns how many were
    /// inserted (0 when the store was not empty).
    fn seed_if_empty(&self, catalog: &[NewEvent]) -> StoreResult<usize>;

    fn email_exists(&self, email: &str) -> StoreResult<bool>;

    /// Insert an account and return its id. Callers check [`Store::email_exists`]
    /// first; the relational backend additionally rejects duplicates with
    /// [`crate::StoreError::EmailTaken`].
    fn insert_account(&self, account: NewAccount) -> StoreResult<i64>;

    /// Append a registration stamped with the current time and return its id.
    fn insert_registration(&self, registration: NewRegistration) -> StoreResult<i64>;
}
