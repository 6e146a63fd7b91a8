//! Authentication: HTTP session, form login and cookie token extraction.

pub mod login;
pub mod session;
pub mod tokens;

pub use login::Authenticator;
pub use session::Session;
pub use tokens::{extract_access_token, extract_xsrf_token};
