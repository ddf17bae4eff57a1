//! Authentication module
//!
//! The platform authenticates every request with three static headers taken
//! from the tap configuration. There is no token exchange or refresh.

mod headers;

pub use headers::{AuthHeaders, APP_KEY_HEADER, USERNAME_HEADER, USER_KEY_HEADER};

#[cfg(test)]
mod tests;
