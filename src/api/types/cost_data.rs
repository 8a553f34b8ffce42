//! Response bodies for the country and city routes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::cost_data::{
    CityData, CitySummary, CountryCode, CountryData, CountrySummary, DataQuality,
};

/// `GET /api/countries`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryListResponse {
    pub success: bool,
    pub countries: Vec<CountrySummary>,
    pub count: usize,
}

impl CountryListResponse {
    pub fn new(countries: Vec<CountrySummary>) -> Self {
        Self {
            success: true,
            count: countries.len(),
            countries,
        }
    }
}

/// `GET /api/countries/{code}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryResponse {
    pub success: bool,
    pub country: CountryData,
}

impl CountryResponse {
    pub fn new(country: CountryData) -> Self {
        Self {
            success: true,
            country,
        }
    }
}

/// `GET /api/countries/{code}/cities`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityListResponse {
    pub success: bool,
    pub cities: Vec<CitySummary>,
    pub count: usize,
}

impl CityListResponse {
    pub fn new(cities: Vec<CitySummary>) -> Self {
        Self {
            success: true,
            count: cities.len(),
            cities,
        }
    }
}

/// Flat wire shape of a city record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityDto {
    pub name: String,
    pub country_code: CountryCode,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub population: Option<u64>,
    pub housing_multiplier: f64,
    pub food_multiplier: f64,
    pub transport_multiplier: f64,
    pub utilities_multiplier: f64,
    pub entertainment_multiplier: f64,
    pub avg_rent_studio: Option<f64>,
    #[serde(rename = "avgRent1Bedroom")]
    pub avg_rent_1_bedroom: Option<f64>,
    #[serde(rename = "avgRent3Bedroom")]
    pub avg_rent_3_bedroom: Option<f64>,
    pub avg_meal_inexpensive: Option<f64>,
    pub avg_meal_mid_range: Option<f64>,
    pub avg_transport_pass: Option<f64>,
    pub avg_utilities: Option<f64>,
    pub avg_internet: Option<f64>,
    pub avg_gym_membership: Option<f64>,
    pub data_source: String,
    pub data_quality: DataQuality,
    pub last_fetched_at: DateTime<Utc>,
}

impl From<CityData> for CityDto {
    fn from(city: CityData) -> Self {
        let prices = &city.average_prices;

        Self {
            name: city.name().to_string(),
            country_code: city.country_code().clone(),
            latitude: city.latitude,
            longitude: city.longitude,
            population: city.population,
            housing_multiplier: city.multipliers.housing,
            food_multiplier: city.multipliers.food,
            transport_multiplier: city.multipliers.transport,
            utilities_multiplier: city.multipliers.utilities,
            entertainment_multiplier: city.multipliers.entertainment,
            avg_rent_studio: prices.rent_studio,
            avg_rent_1_bedroom: prices.rent_1_bedroom,
            avg_rent_3_bedroom: prices.rent_3_bedroom,
            avg_meal_inexpensive: prices.meal_inexpensive,
            avg_meal_mid_range: prices.meal_mid_range,
            avg_transport_pass: prices.transport_pass,
            avg_utilities: prices.utilities,
            avg_internet: prices.internet,
            avg_gym_membership: prices.gym_membership,
            data_source: city.data_source,
            data_quality: city.data_quality,
            last_fetched_at: city.last_fetched_at,
        }
    }
}

/// `GET /api/cities/{country}/{city}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityResponse {
    pub success: bool,
    pub city: CityDto,
}

impl CityResponse {
    pub fn new(city: CityData) -> Self {
        Self {
            success: true,
            city: city.into(),
        }
    }
}
