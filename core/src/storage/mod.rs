pub mod file;
pub mod memory;
pub mod traits;

pub use file::{default_data_dir, FileTaskStorage, DEFAULT_STORAGE_KEY};
pub use memory::MemoryTaskStorage;
pub use traits::TaskStorage;
