//! Request middleware: trace identifiers, request logging, and CORS headers.

pub mod cors;
pub mod trace;

pub use cors::cors_headers;
pub use trace::Trace;
