//! Process-wide SQL driver registration.
//!
//! `sqlx`'s `Any` pool dispatches on the URL scheme to a driver looked up in a
//! global registry. The registry must be filled before the first pool is
//! opened and may only be filled once per process.

use std::sync::Once;

use tracing::debug;

static INSTALL_DRIVERS: Once = Once::new();

/// Registers every compiled-in SQL driver with the `Any` registry.
///
/// Safe to call any number of times from any thread; only the first call
/// does work.
pub fn install_drivers() {
    INSTALL_DRIVERS.call_once(|| {
        sqlx::any::install_default_drivers();
        debug!("sql drivers registered");
    });
}

#[cfg(test)]
fn drivers_installed() -> bool {
    INSTALL_DRIVERS.is_completed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_is_idempotent() {
        install_drivers();
        install_drivers();
        assert!(drivers_installed());
    }

    #[test]
    fn install_from_many_threads() {
        let handles: Vec<_> = (0..8).map(|_| std::thread::spawn(install_drivers)).collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert!(drivers_installed());
    }
}
