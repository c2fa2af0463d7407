//! API Module
//!
//! HTTP handlers and routing that expose the content cache and preloader
//! to the web tier.
//!
//! # Endpoints
//! - `GET /api/trending`, `GET /api/library`, `GET /api/content/:id`,
//!   `GET /api/related-content` - Cached content reads
//! - `POST /cache/invalidate`, `DELETE /cache`, `GET /cache/stats` - Cache control
//! - `POST /preload/{page,related,images}`, `GET /preload/stats` - Preloading
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
