pub mod error;
pub mod status;
pub mod vocab;

pub use error::{GateError, Result};
pub use status::RequestStatus;
pub use vocab::{CmoSampleClass, SampleOrigin, SampleType, SpecimenType};
