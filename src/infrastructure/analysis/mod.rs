//! Remote analysis service adapters

mod http;

pub use http::HttpAnalysisService;
