//! Unit and service tests for the notification context.

mod fanout_tests;
