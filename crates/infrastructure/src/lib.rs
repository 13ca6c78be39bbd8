pub mod database;
pub mod dns;
pub mod feed;
pub mod queue;
pub mod repositories;
