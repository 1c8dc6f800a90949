// Testing Tools Library
//
// End-to-end checks that drive a running fan-out server over real HTTP.
// Currently includes:
// - sse-test-client: opens event streams, fires triggers, verifies delivery

pub mod api_client;
pub mod output;
pub mod scenarios;
pub mod sse_client;
