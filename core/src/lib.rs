pub mod codec;
pub mod input;
pub mod model;
pub mod service;
pub mod storage;

pub use input::{FormField, IntakeForm};
pub use model::id::IdGenerator;
pub use model::task::{Status, Task, TaskId, TaskValidationError};
pub use service::board::{Board, Column};
pub use service::task_store::{TaskActions, TaskSink, TaskStore};
pub use storage::{
    default_data_dir, FileTaskStorage, MemoryTaskStorage, TaskStorage, DEFAULT_STORAGE_KEY,
};
