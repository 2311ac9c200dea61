pub mod avatar;
pub mod handlers;
