//! Case composition domain module

mod draft;

pub use draft::{AnalysisRequest, CaseDraft};
