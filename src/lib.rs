//! # Classhub (class booking client)
//!
//! `classhub` registers users against an external identity service and lists
//! the course offerings published by the course-data API.
//!
//! ## Registration
//!
//! A registration is validated locally first. The ordered form checks (length,
//! required fields, confirmation) short-circuit on the first failure, while the
//! password field rules (capital letter, special character) are always reported
//! alongside them. Only a clean submission reaches the identity service, which
//! creates the account and then receives the display profile (name and photo).
//!
//! The flow never looks up a global session: the caller injects a
//! [`features::auth::SessionProvider`] and an [`features::auth::IdentityProvider`].
//! Identity failures are logged and returned as tagged errors; they carry no
//! user-facing message.
//!
//! ## Course listing
//!
//! Each activation issues exactly one `GET` against the course endpoint and
//! replaces the held collection wholesale. Courses without seats render as sold
//! out with their action disabled.
//!
//! Both components discard completions that belong to a superseded request.

pub mod app;
pub mod cli;
pub mod features;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
