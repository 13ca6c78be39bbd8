pub mod nrd_archive;

pub use nrd_archive::NrdArchiveFeed;
