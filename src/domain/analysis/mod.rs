//! Analysis domain module

mod flight;
mod record;
mod result;

pub use flight::{InvalidRequestTransition, RequestFlight, RequestState};
pub use record::{DocumentRecord, UserRecord};
pub use result::{parse_percentage, AnalysisResult, StrengthComparison};
