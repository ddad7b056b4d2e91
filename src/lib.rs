//! # Vouchd (Credential Verification Service)
//!
//! `vouchd` answers a single question over HTTP: does this username/password
//! pair check out against the configured backend? The backend is either a
//! Vault KV v2 mount holding per-user credential records, or an OpenLDAP
//! directory reached through the classic admin-bind / search / user-bind
//! sequence.
//!
//! Every request gets an `HTTP 200` answer whose body is a JSON verdict;
//! callers distinguish outcomes by the `success` flag and `message` text,
//! never by status code. The process keeps no state between requests.

pub mod cli;
pub mod directory;
pub mod vault;
pub mod vouchd;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
