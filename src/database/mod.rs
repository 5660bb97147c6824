pub mod manager;
pub mod memory;
pub mod models;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryPostRepository;
pub use models::Post;
pub use repository::{PgPostRepository, PostRepository};
