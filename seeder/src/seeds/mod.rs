pub mod authority;
pub mod notice;
pub mod notice_read;
pub mod user;
