//! Cost data domain - Country and city economic metadata

mod city;
mod country;
mod freshness;
mod merge;
mod quality;
mod resolution;
mod validation;

pub use city::{
    AveragePrices, CityData, CityKey, CityLookup, CityPatch, CitySummary, CostMultipliers,
};
pub use country::{CountryCode, CountryData, CountryLookup, CountryPatch, CountrySummary};
pub use freshness::{DEFAULT_COST_DATA_TTL_DAYS, is_fresh};
pub use merge::{merge_city, merge_country};
pub use quality::DataQuality;
pub use resolution::{Resolution, ResolutionOutcome};
pub use validation::{
    CostDataValidationError, MAX_CITY_NAME_LENGTH, normalize_city_name, normalize_country_code,
    normalize_currency_code,
};
