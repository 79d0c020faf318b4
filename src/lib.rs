pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod payload;
pub mod prettyprint;
pub mod routines;
pub mod sheets;

pub use app::{run, AppError};
pub use payload::{PayloadError, UpdatePayload};
pub use sheets::A1Notation;
