//! Model module containing data structures for forecast operations

mod envelope;
mod forecast_output;

pub use envelope::Envelope;
pub use forecast_output::{ForecastOutput, ForecastStep};
