pub mod sqlite_job_queue;

pub use sqlite_job_queue::SqliteJobQueue;
