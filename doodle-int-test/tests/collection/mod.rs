mod delete_test;
mod edit_test;
mod find_test;
mod index_test;
mod push_test;
