//! Document store test suite
//!
//! - crud: put/get/update/delete/exists and key listing
//! - find: selector queries over the fixtures, error propagation
//! - database: shared connections, corrupt rows, configuration

#[path = "../common/mod.rs"]
mod common;

mod crud;
