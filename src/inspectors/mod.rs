pub mod curl;
pub mod http;
pub mod inspector;

pub use curl::CurlInspector;
pub use http::HttpInspector;
pub use inspector::HeaderSource;
