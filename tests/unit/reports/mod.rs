pub mod dispatch;
pub mod summary;
