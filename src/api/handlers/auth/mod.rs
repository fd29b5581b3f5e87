//! Signup, login, sessions, and the pages they gate.

pub mod login;
pub mod profile;
pub mod session;
pub mod signup;
pub mod state;

pub(crate) mod storage;
pub(crate) mod utils;
