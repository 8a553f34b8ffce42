use serde::Serialize;

/// Monthly pet costs in IDR
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PetCosts {
    pub food: f64,
    pub vet: f64,
    pub grooming: f64,
    pub insurance: f64,
    /// One-time import paperwork spread over a year
    pub import: f64,
}

const FOOD_PER_PET: f64 = 300_000.0;
const VET_PER_PET: f64 = 150_000.0;
const GROOMING_PER_PET: f64 = 100_000.0;
const INSURANCE_PER_PET: f64 = 200_000.0;

const DOG_EXTRA_FOOD: f64 = 200_000.0;
const DOG_EXTRA_VET: f64 = 100_000.0;
const DOG_EXTRA_GROOMING: f64 = 150_000.0;

const IMPORT_COST: f64 = 3_000_000.0;
const DOG_IMPORT_COST: f64 = 5_000_000.0;
const IMPORT_AMORTIZATION_MONTHS: f64 = 12.0;

impl PetCosts {
    /// Costs for `pets` animals; nothing is charged without pets
    pub fn calculate(pets: u32, has_dog: bool) -> Self {
        if pets == 0 {
            return Self::default();
        }

        let count = f64::from(pets);
        let mut costs = Self {
            food: count * FOOD_PER_PET,
            vet: count * VET_PER_PET,
            grooming: count * GROOMING_PER_PET,
            insurance: count * INSURANCE_PER_PET,
            import: IMPORT_COST / IMPORT_AMORTIZATION_MONTHS,
        };

        if has_dog {
            costs.food += DOG_EXTRA_FOOD;
            costs.vet += DOG_EXTRA_VET;
            costs.grooming += DOG_EXTRA_GROOMING;
            costs.import = DOG_IMPORT_COST / IMPORT_AMORTIZATION_MONTHS;
        }

        costs
    }

    /// Vet visits plus insurance
    pub fn healthcare(&self) -> f64 {
        self.vet + self.insurance
    }

    /// Grooming plus amortized import
    pub fn services(&self) -> f64 {
        self.grooming + self.import
    }

    pub fn monthly_total(&self) -> f64 {
        self.food + self.healthcare() + self.services()
    }
}
