// URL handling utilities
pub mod url_parser;
pub mod url_builder;

pub use url_parser::{bearer_token, hostname_from_url};
pub use url_builder::{join_url, return_url, with_query_param};
