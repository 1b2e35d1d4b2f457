//! # Record Service
//!
//! HTTP endpoints for the student collection. Requests are translated into
//! [`StudentStore`](crate::store::StudentStore) calls and outcomes are mapped
//! to status codes.
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | GET | `/api/students` | 200, array of students |
//! | POST | `/api/students` | 201, created student |
//! | PUT | `/api/students/:id` | 200, updated student |
//! | DELETE | `/api/students/:id` | 200, `{ "message" }` |

pub mod errors;
pub mod handler;
pub mod response;
pub mod server;

pub use errors::{ErrorResponse, RestError, RestResult};
pub use handler::StudentService;
pub use response::DeleteResponse;
pub use server::RestServer;
