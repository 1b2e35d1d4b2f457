//! rollbook - student records over a small REST API
//!
//! - [`store`]: record persistence behind the [`store::StudentStore`] trait
//! - [`rest_api`] and [`http_server`]: the HTTP record service
//! - [`ui`]: client-side controller used by the terminal front-end

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod rest_api;
pub mod schema;
pub mod storage;
pub mod store;
pub mod ui;
