// handlers/protected/posts/mod.rs - Post resource handlers

pub mod create; // POST   /api/posts
pub mod delete; // DELETE /api/posts/:id
pub mod list; // GET    /api/posts
pub mod show; // GET    /api/posts/:id
pub mod update; // PUT    /api/posts/:id
pub mod utils;

pub use create::post_create;
pub use delete::post_delete;
pub use list::post_list;
pub use show::post_show;
pub use update::post_update;
