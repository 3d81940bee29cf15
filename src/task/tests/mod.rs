//! Unit and service tests for the task context.

mod access_tests;
