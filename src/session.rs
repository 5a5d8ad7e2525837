use crate::models::SessionRecord;
use chrono::Local;

pub const SESSION_COOKIE: &str = "password";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Guest,
    Connected,
}

/// The `password` cookie. Its presence is what makes the session connected,
/// so every read and write goes through here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    record: SessionRecord,
}

impl Session {
    pub fn guest() -> Self {
        Self::default()
    }

    pub fn from_record(record: SessionRecord) -> Self {
        let mut session = Self { record };
        if session.record.password.is_none() {
            session.record.connected_at = None;
        }
        session
    }

    pub fn record(&self) -> &SessionRecord {
        &self.record
    }

    pub fn state(&self) -> SessionState {
        match self.record.password {
            Some(_) => SessionState::Connected,
            None => SessionState::Guest,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.state() == SessionState::Connected
    }

    pub fn password(&self) -> Option<&str> {
        self.record.password.as_deref()
    }

    pub fn connect(&mut self, password: impl Into<String>) {
        self.record = SessionRecord {
            password: Some(password.into()),
            connected_at: Some(Local::now().to_rfc3339()),
        };
    }

    pub fn disconnect(&mut self) {
        self.record = SessionRecord::default();
    }

    /// `Cookie` header value, when there is a cookie to send.
    pub fn cookie_header(&self) -> Option<String> {
        let password = self.password()?;
        let encoded: String = url::form_urlencoded::byte_serialize(password.as_bytes()).collect();
        Some(format!("{SESSION_COOKIE}={encoded}"))
    }
}
