//! Session gate for the dashboard

pub mod session;

pub use session::{
    SESSION_COOKIE, cleared_cookie, issue_token, session_cookie, verify_password, verify_token,
};
