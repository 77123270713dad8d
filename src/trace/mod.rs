pub mod error_json_result;
pub mod trace_macros;
pub mod trace_sink;
pub mod tracer;
pub use error_json_result::ErrorJsonResult;
pub use tracer::TraceLogger;
