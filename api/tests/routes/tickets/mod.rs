mod delete_test;
mod dispatch_test;
mod e2e_test;
