pub mod delete_test;
pub mod post_test;
pub mod put_test;
