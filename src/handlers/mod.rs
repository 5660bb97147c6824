// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) → Protected (JWT bearer auth, applied as a route layer in `app`)
pub mod public; // GET /, GET /health
pub mod protected; // /api/posts[/:id]
