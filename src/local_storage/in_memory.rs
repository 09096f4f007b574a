use super::LocalStorage;
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Mutex;

/// Process-local storage, lost on exit.
#[derive(Default)]
pub struct InMemoryLocalStorage {
    items: Mutex<HashMap<String, String>>,
}

impl InMemoryLocalStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStorage for InMemoryLocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.lock().unwrap().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items.lock().unwrap().remove(key);
        Ok(())
    }
}
