pub mod client_version;
pub mod descriptor;
pub mod error_log;
pub mod request;
pub mod request_counter;
pub mod tweet;
