//! Category CRUD feature.
//!
//! Categories are looked up by id or listed in full; names are unique across
//! all rows, soft-deleted ones included. Deletion is hard by default, with an
//! opt-in soft delete that keeps the row retrievable.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/categories` | List all categories |
//! | GET | `/api/categories/{id}` | Get category by id |
//! | POST | `/api/categories` | Create category |
//! | PUT | `/api/categories/{id}` | Update category |
//! | DELETE | `/api/categories/{id}` | Delete category (`?soft=true` for soft delete) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use services::CategoryService;
