use super::backend::{Area, StorageBackend};
use crate::error::{Result, StoreError};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since shopkeep is single-threaded.
#[derive(Default)]
pub struct MemBackend {
    values: RefCell<HashMap<(Area, String), String>>,
    failing_areas: RefCell<Vec<Area>>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every write to `area` fail, for testing error handling.
    pub fn set_simulate_write_error(&self, area: Area, simulate: bool) {
        let mut failing = self.failing_areas.borrow_mut();
        failing.retain(|a| *a != area);
        if simulate {
            failing.push(area);
        }
    }

    fn check_writable(&self, area: Area) -> Result<()> {
        if self.failing_areas.borrow().contains(&area) {
            return Err(StoreError::Store(format!(
                "Simulated write error in {}",
                area
            )));
        }
        Ok(())
    }
}

impl StorageBackend for MemBackend {
    fn get(&self, area: Area, key: &str) -> Result<Option<String>> {
        Ok(self.values.borrow().get(&(area, key.to_string())).cloned())
    }

    fn put(&self, area: Area, key: &str, value: &str) -> Result<()> {
        self.check_writable(area)?;
        self.values
            .borrow_mut()
            .insert((area, key.to_string()), value.to_string());
        Ok(())
    }

    fn remove(&self, area: Area, key: &str) -> Result<()> {
        self.check_writable(area)?;
        self.values.borrow_mut().remove(&(area, key.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_areas_are_isolated() {
        let backend = MemBackend::new();
        backend.put(Area::Local, "appData", "local").unwrap();
        backend.put(Area::Records, "appData", "record").unwrap();

        assert_eq!(
            backend.get(Area::Local, "appData").unwrap().as_deref(),
            Some("local")
        );
        assert_eq!(
            backend.get(Area::Records, "appData").unwrap().as_deref(),
            Some("record")
        );
        assert_eq!(backend.get(Area::Records, "other").unwrap(), None);
    }

    #[test]
    fn test_simulated_write_error_is_per_area() {
        let backend = MemBackend::new();
        backend.set_simulate_write_error(Area::Records, true);

        assert!(backend.put(Area::Records, "k", "v").is_err());
        assert!(backend.put(Area::Local, "k", "v").is_ok());

        backend.set_simulate_write_error(Area::Records, false);
        assert!(backend.put(Area::Records, "k", "v").is_ok());
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        let backend = MemBackend::new();
        backend.remove(Area::Local, "nope").unwrap();
        assert_eq!(backend.get(Area::Local, "nope").unwrap(), None);
    }
}
