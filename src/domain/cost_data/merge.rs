//! Shallow merge of source patches onto cached records

use chrono::{DateTime, Utc};

use super::city::{CityData, CityKey, CityPatch};
use super::country::{CountryCode, CountryData, CountryPatch};

fn overlay<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

fn overlay_opt<T>(target: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *target = value;
    }
}

/// Overlays a country patch onto the existing record.
///
/// Fields the patch leaves empty keep their cached value; origin, quality
/// and fetch time always come from the patch. Without an existing record
/// the patch must carry `name` and `currency`, otherwise `None` is returned.
pub fn merge_country(
    existing: Option<&CountryData>,
    code: &CountryCode,
    patch: CountryPatch,
    fetched_at: DateTime<Utc>,
) -> Option<CountryData> {
    let mut record = match existing {
        Some(existing) => existing.clone(),
        None => {
            let name = patch.name.clone()?;
            let currency = patch.currency.clone()?;

            CountryData {
                code: code.clone(),
                name,
                currency_symbol: currency.clone(),
                currency,
                exchange_rate_to_usd: 1.0,
                exchange_rate_to_eur: 1.0,
                cost_of_living_index: None,
                rent_index: None,
                groceries_index: None,
                restaurant_price_index: None,
                local_purchasing_power: None,
                average_salary: None,
                data_source: patch.data_source.clone(),
                data_quality: patch.data_quality,
                last_fetched_at: fetched_at,
            }
        }
    };

    overlay(&mut record.name, patch.name);
    overlay(&mut record.currency, patch.currency);
    overlay(&mut record.currency_symbol, patch.currency_symbol);
    overlay(&mut record.exchange_rate_to_usd, patch.exchange_rate_to_usd);
    overlay(&mut record.exchange_rate_to_eur, patch.exchange_rate_to_eur);
    overlay_opt(&mut record.cost_of_living_index, patch.cost_of_living_index);
    overlay_opt(&mut record.rent_index, patch.rent_index);
    overlay_opt(&mut record.groceries_index, patch.groceries_index);
    overlay_opt(&mut record.restaurant_price_index, patch.restaurant_price_index);
    overlay_opt(&mut record.local_purchasing_power, patch.local_purchasing_power);
    overlay_opt(&mut record.average_salary, patch.average_salary);
    record.data_source = patch.data_source;
    record.data_quality = patch.data_quality;
    record.last_fetched_at = fetched_at;

    Some(record)
}

/// Overlays a city patch onto the existing record.
///
/// Cities need no identity fields beyond their key, so a new record starts
/// with neutral multipliers and no prices.
pub fn merge_city(
    existing: Option<&CityData>,
    key: &CityKey,
    patch: CityPatch,
    fetched_at: DateTime<Utc>,
) -> CityData {
    let mut record = existing.cloned().unwrap_or_else(|| CityData {
        key: key.clone(),
        latitude: None,
        longitude: None,
        population: None,
        multipliers: Default::default(),
        average_prices: Default::default(),
        data_source: patch.data_source.clone(),
        data_quality: patch.data_quality,
        last_fetched_at: fetched_at,
    });

    overlay_opt(&mut record.latitude, patch.latitude);
    overlay_opt(&mut record.longitude, patch.longitude);
    overlay_opt(&mut record.population, patch.population);
    overlay(&mut record.multipliers, patch.multipliers);
    if let Some(prices) = &patch.average_prices {
        record.average_prices.overlay(prices);
    }
    record.data_source = patch.data_source;
    record.data_quality = patch.data_quality;
    record.last_fetched_at = fetched_at;

    record
}
