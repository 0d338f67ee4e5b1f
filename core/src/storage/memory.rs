use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;

use crate::storage::traits::TaskStorage;

/// In-process storage. Clones share the same slot, so a caller can keep a
/// handle and inspect what the store wrote.
#[derive(Clone, Default, Debug)]
pub struct MemoryTaskStorage {
    value: Rc<RefCell<Option<String>>>,
}

impl MemoryTaskStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(data: impl Into<String>) -> Self {
        Self {
            value: Rc::new(RefCell::new(Some(data.into()))),
        }
    }

    pub fn value(&self) -> Option<String> {
        self.value.borrow().clone()
    }
}

impl TaskStorage for MemoryTaskStorage {
    fn load(&self) -> Option<String> {
        self.value()
    }

    fn save(&self, data: &str) -> Result<()> {
        *self.value.borrow_mut() = Some(data.to_string());
        Ok(())
    }
}
