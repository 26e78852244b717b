pub mod m202608010001_create_users;
pub mod m202608010002_create_user_authorities;
pub mod m202608010003_create_notices;
pub mod m202608010004_create_notice_reads;
