pub mod alumni_repo;
pub mod event_repo;
pub mod news_repo;
pub mod query;

pub use alumni_repo::AlumniRepository;
pub use event_repo::EventRepository;
pub use news_repo::NewsRepository;
