pub mod rates;

pub use rates::{RateTable, RateTableError};
