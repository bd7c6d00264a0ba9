pub mod alumni;
pub mod event;
pub mod news;

pub use alumni::Entity as AlumniEntity;
pub use event::Entity as EventEntity;
pub use news::Entity as NewsEntity;
