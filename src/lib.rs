pub mod api;
pub mod controller;
pub mod errors;
pub mod models;
pub mod page;
pub mod properties;
pub mod routes;
pub mod session;
pub mod storage;

pub use api::{ApiClient, Endpoint};
pub use controller::Controller;
pub use errors::{AppError, RemoteError};
pub use page::{Page, PageEvent, RecordingPage};
pub use routes::Route;
pub use session::{Session, SessionState};
pub use storage::{load_session, persist_session, resolve_session_path};
