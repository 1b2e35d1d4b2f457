//! Client UI
//!
//! The board controller and its pieces. Presentation is kept separate in
//! [`render`] so the controller can be driven headless.

mod api;
mod board;
mod form;
mod notification;
pub mod render;

pub use api::{ApiError, ApiResult, HttpStudentApi, StudentApi};
pub use board::{
    DeleteOutcome, StudentBoard, SubmitOutcome, MSG_ADDED, MSG_DELETED, MSG_DELETE_FAILED,
    MSG_FETCH_FAILED, MSG_FIX_FORM, MSG_SAVE_FAILED, MSG_UPDATED,
};
pub use form::{validate_field, FormErrors, StudentDraft};
pub use notification::{Notification, Severity, NOTIFICATION_TTL};
