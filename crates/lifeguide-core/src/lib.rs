//! Core Lifeguide client library (session, API, offline cache, bookmarks).

pub mod api;
pub mod bookmarks;
pub mod cache;
pub mod config;
pub mod debounce;
pub mod logging;
pub mod preferences;
pub mod scope;
pub mod session;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_support;
