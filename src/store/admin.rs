//! Admin unlock flag. A UI convenience switch, not a security boundary.

use tracing::{info, warn};

use super::storage::KeyValueStorage;

pub const ADMIN_KEY: &str = "isAdmin";
pub const ADMIN_MARKER: &str = "true";
pub const ADMIN_SECRET: &str = "khmer-admin";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AdminGate {
    unlocked: bool,
}

impl AdminGate {
    pub fn restore(storage: &dyn KeyValueStorage) -> Self {
        let unlocked = match storage.get(ADMIN_KEY) {
            Ok(value) => value.as_deref() == Some(ADMIN_MARKER),
            Err(e) => {
                warn!(error = %e, "admin_flag_read_failed");
                false
            }
        };
        Self { unlocked }
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn unlock(&mut self, secret: &str, storage: &mut dyn KeyValueStorage) -> bool {
        if secret != ADMIN_SECRET {
            info!("admin_unlock_rejected");
            return false;
        }

        self.unlocked = true;
        if let Err(e) = storage.set(ADMIN_KEY, ADMIN_MARKER) {
            warn!(error = %e, "admin_flag_write_failed");
        }
        info!("admin_unlocked");
        true
    }

    pub fn lock(&mut self, storage: &mut dyn KeyValueStorage) {
        self.unlocked = false;
        if let Err(e) = storage.remove(ADMIN_KEY) {
            warn!(error = %e, "admin_flag_remove_failed");
        }
        info!("admin_locked");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::storage::MemoryStorage;

    #[test]
    fn wrong_secret_keeps_gate_locked() {
        let mut storage = MemoryStorage::new();
        let mut gate = AdminGate::restore(&storage);

        assert!(!gate.unlock("password", &mut storage));
        assert!(!gate.is_unlocked());
        assert_eq!(storage.get(ADMIN_KEY).unwrap(), None);
    }

    #[test]
    fn unlock_persists_and_lock_clears() {
        let mut storage = MemoryStorage::new();
        let mut gate = AdminGate::restore(&storage);

        assert!(gate.unlock(ADMIN_SECRET, &mut storage));
        assert!(AdminGate::restore(&storage).is_unlocked());

        gate.lock(&mut storage);
        assert!(!gate.is_unlocked());
        assert!(!AdminGate::restore(&storage).is_unlocked());
    }

    #[test]
    fn unexpected_marker_is_locked() {
        let mut storage = MemoryStorage::new();
        storage.set(ADMIN_KEY, "yes").unwrap();
        assert!(!AdminGate::restore(&storage).is_unlocked());
    }
}
