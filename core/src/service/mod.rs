pub mod board;
pub mod task_store;
