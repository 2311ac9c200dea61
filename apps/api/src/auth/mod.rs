// Email/password accounts, Redis-backed bearer sessions, and the request
// extractor that turns a token into an explicit `AuthUser`.

pub mod accounts;
pub mod extractor;
pub mod handlers;
pub mod password;
pub mod session;

pub use extractor::AuthUser;
pub use session::SessionStore;
