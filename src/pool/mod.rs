//! Bounded-concurrency task execution
//!
//! This module contains the engine that drains a stream of fetch tasks:
//! - `CancelToken`: sticky, hierarchical stop signal
//! - `isolate`: runs one blocking call on its own thread, faults become data
//! - `TaskSource`: exactly-once task sequence shared by all workers
//! - `WorkerPool`: fixed number of workers running the fetch cycle

mod cancel;
mod isolate;
mod source;
mod task;
mod traits;
mod worker;

pub use cancel::CancelToken;
pub use isolate::isolate;
pub use source::TaskSource;
pub use task::{Hook, NewsItem, Outcome, Task, TaskError};
pub use traits::FetchOperation;
pub use worker::{RunReport, WorkerPool};
