//! Lifestyle budget plans

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::{BudgetCategory, CategoryMultipliers};
use super::lifestyle::LifestyleLevel;
use super::pets::PetCosts;
use crate::domain::DomainError;

pub const DEFAULT_DURATION_DAYS: u32 = 30;
pub const MAX_DURATION_DAYS: u32 = 3650;
pub const MAX_PERSONS: u32 = 20;
pub const MAX_PETS: u32 = 10;

const DAYS_PER_MONTH: f64 = 30.0;
const MONTHS_PER_YEAR: f64 = 12.0;

/// Extra recurring cost supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomCost {
    pub name: String,
    pub monthly_idr: f64,
}

/// Household and spending inputs of a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanRequest {
    pub lifestyle: LifestyleLevel,
    pub duration_days: u32,
    pub persons: u32,
    pub pets: u32,
    pub has_dog: bool,
    pub custom_costs: Vec<CustomCost>,
}

impl Default for PlanRequest {
    fn default() -> Self {
        Self {
            lifestyle: LifestyleLevel::default(),
            duration_days: DEFAULT_DURATION_DAYS,
            persons: 1,
            pets: 0,
            has_dog: false,
            custom_costs: Vec::new(),
        }
    }
}

impl PlanRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        if !(1..=MAX_DURATION_DAYS).contains(&self.duration_days) {
            return Err(DomainError::validation(format!(
                "Duration must be between 1 and {} days",
                MAX_DURATION_DAYS
            )));
        }
        if !(1..=MAX_PERSONS).contains(&self.persons) {
            return Err(DomainError::validation(format!(
                "Persons must be between 1 and {}",
                MAX_PERSONS
            )));
        }
        if self.pets > MAX_PETS {
            return Err(DomainError::validation(format!(
                "At most {} pets are supported",
                MAX_PETS
            )));
        }
        if self.has_dog && self.pets == 0 {
            return Err(DomainError::validation("hasDog requires at least one pet"));
        }

        for cost in &self.custom_costs {
            if cost.name.trim().is_empty() {
                return Err(DomainError::validation("Custom cost name cannot be empty"));
            }
            if !cost.monthly_idr.is_finite() || cost.monthly_idr < 0.0 {
                return Err(DomainError::validation(format!(
                    "Custom cost '{}' must be a non-negative amount",
                    cost.name.trim()
                )));
            }
        }

        Ok(())
    }
}

/// Bucket a plan line is reported under
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakdownBucket {
    Housing,
    Food,
    Transportation,
    Utilities,
    Healthcare,
    Entertainment,
    Pets,
    Other,
}

impl From<BudgetCategory> for BreakdownBucket {
    fn from(category: BudgetCategory) -> Self {
        match category {
            BudgetCategory::Housing => BreakdownBucket::Housing,
            BudgetCategory::Food => BreakdownBucket::Food,
            BudgetCategory::Transportation => BreakdownBucket::Transportation,
            BudgetCategory::Utilities => BreakdownBucket::Utilities,
            BudgetCategory::Healthcare => BreakdownBucket::Healthcare,
            BudgetCategory::Entertainment => BreakdownBucket::Entertainment,
        }
    }
}

/// One monthly cost line in both currencies
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostLine {
    pub name: String,
    pub bucket: BreakdownBucket,
    pub monthly_eur: f64,
    pub monthly_idr: f64,
    pub yearly_eur: f64,
    pub yearly_idr: f64,
}

impl CostLine {
    fn from_eur(name: impl Into<String>, bucket: BreakdownBucket, monthly_eur: f64, rate: f64) -> Self {
        Self::build(name.into(), bucket, monthly_eur, monthly_eur * rate)
    }

    fn from_idr(name: impl Into<String>, bucket: BreakdownBucket, monthly_idr: f64, rate: f64) -> Self {
        Self::build(name.into(), bucket, monthly_idr / rate, monthly_idr)
    }

    fn build(name: String, bucket: BreakdownBucket, monthly_eur: f64, monthly_idr: f64) -> Self {
        Self {
            name,
            bucket,
            monthly_eur,
            monthly_idr,
            yearly_eur: monthly_eur * MONTHS_PER_YEAR,
            yearly_idr: monthly_idr * MONTHS_PER_YEAR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownEntry {
    pub eur: f64,
    pub idr: f64,
    /// Share of the monthly IDR total, 0 when the total is 0
    pub percentage: f64,
}

/// Total plan cost in EUR under each season
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalVariations {
    pub rainy_season: f64,
    pub dry_season: f64,
    pub peak_season: f64,
    pub low_season: f64,
}

impl SeasonalVariations {
    pub fn from_total(total_eur: f64) -> Self {
        Self {
            rainy_season: total_eur * 1.1,
            dry_season: total_eur,
            peak_season: total_eur * 1.3,
            low_season: total_eur * 0.9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialPlan {
    pub id: Uuid,
    pub lifestyle: LifestyleLevel,
    pub duration_days: u32,
    pub persons: u32,
    pub pets: u32,
    /// Area or city the multipliers came from
    pub location: Option<String>,
    pub multipliers: CategoryMultipliers,
    /// IDR per EUR
    pub exchange_rate: f64,
    pub categories: Vec<CostLine>,
    pub total_monthly_eur: f64,
    pub total_monthly_idr: f64,
    pub total_cost_eur: f64,
    pub total_cost_idr: f64,
    pub breakdown: BTreeMap<BreakdownBucket, BreakdownEntry>,
    pub seasonal_variations: SeasonalVariations,
    pub pet_details: PetCosts,
    pub created_at: DateTime<Utc>,
}

/// Builds a plan from the request, location multipliers and EUR to IDR rate
pub fn calculate_plan(
    request: &PlanRequest,
    location: Option<String>,
    multipliers: CategoryMultipliers,
    eur_to_idr: f64,
) -> Result<FinancialPlan, DomainError> {
    request.validate()?;
    if !eur_to_idr.is_finite() || eur_to_idr <= 0.0 {
        return Err(DomainError::validation(format!(
            "Exchange rate {} is not usable",
            eur_to_idr
        )));
    }

    let persons = f64::from(request.persons);
    let mut categories: Vec<CostLine> = BudgetCategory::ALL
        .iter()
        .map(|category| {
            let monthly_eur =
                request.lifestyle.monthly_base_eur(*category) * persons * multipliers.get(*category);
            CostLine::from_eur(category.as_str(), (*category).into(), monthly_eur, eur_to_idr)
        })
        .collect();

    let pet_details = PetCosts::calculate(request.pets, request.has_dog);
    if request.pets > 0 {
        categories.push(CostLine::from_idr(
            "pet food",
            BreakdownBucket::Pets,
            pet_details.food,
            eur_to_idr,
        ));
        categories.push(CostLine::from_idr(
            "pet healthcare",
            BreakdownBucket::Pets,
            pet_details.healthcare(),
            eur_to_idr,
        ));
        categories.push(CostLine::from_idr(
            "pet services",
            BreakdownBucket::Pets,
            pet_details.services(),
            eur_to_idr,
        ));
    }

    for cost in &request.custom_costs {
        categories.push(CostLine::from_idr(
            cost.name.trim(),
            BreakdownBucket::Other,
            cost.monthly_idr,
            eur_to_idr,
        ));
    }

    let total_monthly_eur: f64 = categories.iter().map(|c| c.monthly_eur).sum();
    let total_monthly_idr: f64 = categories.iter().map(|c| c.monthly_idr).sum();
    let months = f64::from(request.duration_days) / DAYS_PER_MONTH;
    let total_cost_eur = total_monthly_eur * months;
    let total_cost_idr = total_monthly_idr * months;

    if !total_cost_idr.is_finite() {
        return Err(DomainError::validation("Plan total is too large to compute"));
    }

    Ok(FinancialPlan {
        id: Uuid::new_v4(),
        lifestyle: request.lifestyle,
        duration_days: request.duration_days,
        persons: request.persons,
        pets: request.pets,
        location,
        multipliers,
        exchange_rate: eur_to_idr,
        breakdown: breakdown(&categories, total_monthly_idr),
        categories,
        total_monthly_eur,
        total_monthly_idr,
        total_cost_eur,
        total_cost_idr,
        seasonal_variations: SeasonalVariations::from_total(total_cost_eur),
        pet_details,
        created_at: Utc::now(),
    })
}

fn breakdown(lines: &[CostLine], total_monthly_idr: f64) -> BTreeMap<BreakdownBucket, BreakdownEntry> {
    let mut buckets: BTreeMap<BreakdownBucket, BreakdownEntry> = BTreeMap::new();

    for line in lines {
        let entry = buckets.entry(line.bucket).or_default();
        entry.eur += line.monthly_eur;
        entry.idr += line.monthly_idr;
    }

    if total_monthly_idr > 0.0 {
        for entry in buckets.values_mut() {
            entry.percentage = entry.idr / total_monthly_idr * 100.0;
        }
    }

    buckets
}
