pub mod notice;
pub mod notice_read;
pub mod user;
pub mod user_authority;
