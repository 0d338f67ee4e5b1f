pub mod id;
pub mod task;
