use gloo::storage::{LocalStorage, Storage};
use shared::User;

/// Local storage key holding the signed in user
pub const SESSION_KEY: &str = "user";

/// Signed in user, if any
pub fn read_session() -> Option<User> {
    match LocalStorage::get::<User>(SESSION_KEY) {
        Ok(user) => Some(user),
        Err(e) => {
            log::debug!("No session: {}", e);
            None
        }
    }
}

pub fn store_session(user: &User) {
    if let Err(e) = LocalStorage::set(SESSION_KEY, user) {
        log::error!("Failed to store session: {}", e);
    }
}

pub fn clear_session() {
    LocalStorage::delete(SESSION_KEY);
}
