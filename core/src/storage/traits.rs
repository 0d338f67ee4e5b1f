use anyhow::Result;

/// Key-value slot holding the encoded task sequence.
pub trait TaskStorage {
    /// Previously saved value, or `None` if nothing is stored or it cannot be read.
    fn load(&self) -> Option<String>;
    /// Replaces the stored value.
    fn save(&self, data: &str) -> Result<()>;
}

impl<T: TaskStorage + ?Sized> TaskStorage for Box<T> {
    fn load(&self) -> Option<String> {
        (**self).load()
    }

    fn save(&self, data: &str) -> Result<()> {
        (**self).save(data)
    }
}
