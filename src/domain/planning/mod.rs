//! Planning domain - Lifestyle budgets priced for a location

mod area;
mod category;
mod lifestyle;
mod pets;
mod plan;

pub use area::{AreaDetection, AreaProfile};
pub use category::{BudgetCategory, CategoryMultipliers};
pub use lifestyle::LifestyleLevel;
pub use pets::PetCosts;
pub use plan::{
    BreakdownBucket, BreakdownEntry, CostLine, CustomCost, DEFAULT_DURATION_DAYS, FinancialPlan,
    MAX_DURATION_DAYS, MAX_PERSONS, MAX_PETS, PlanRequest, SeasonalVariations, calculate_plan,
};
