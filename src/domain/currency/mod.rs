//! Currency domain - Exchange rates between currency pairs

mod pair;
mod rate;

pub use pair::{CurrencyCode, CurrencyPair};
pub use rate::{Conversion, ExchangeRateRecord, IDENTITY_SOURCE, RateQuote};
