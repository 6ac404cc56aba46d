pub mod task;

pub use task::{PageBound, Task, TaskDraft, TaskMetrics};
