//! Integration tests for tasksync-http
//!
//! Uses wiremock to simulate the todo service and verifies requests,
//! decoding and error mapping of the RestClient and HttpRemoteStore.

mod common;

mod test_errors;
mod test_todos;
