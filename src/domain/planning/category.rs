//! Budget categories and per-category location multipliers

use serde::{Deserialize, Serialize};

use crate::domain::cost_data::CostMultipliers;

/// Recurring living-cost category of a budget plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetCategory {
    Housing,
    Food,
    Transportation,
    Utilities,
    Healthcare,
    Entertainment,
}

impl BudgetCategory {
    pub const ALL: [BudgetCategory; 6] = [
        BudgetCategory::Housing,
        BudgetCategory::Food,
        BudgetCategory::Transportation,
        BudgetCategory::Utilities,
        BudgetCategory::Healthcare,
        BudgetCategory::Entertainment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetCategory::Housing => "housing",
            BudgetCategory::Food => "food",
            BudgetCategory::Transportation => "transportation",
            BudgetCategory::Utilities => "utilities",
            BudgetCategory::Healthcare => "healthcare",
            BudgetCategory::Entertainment => "entertainment",
        }
    }
}

impl std::fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Cost factor per budget category, 1.0 meaning the lifestyle baseline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryMultipliers {
    pub housing: f64,
    pub food: f64,
    pub transportation: f64,
    pub utilities: f64,
    pub healthcare: f64,
    pub entertainment: f64,
}

impl CategoryMultipliers {
    pub const NEUTRAL: CategoryMultipliers = CategoryMultipliers {
        housing: 1.0,
        food: 1.0,
        transportation: 1.0,
        utilities: 1.0,
        healthcare: 1.0,
        entertainment: 1.0,
    };

    pub fn get(&self, category: BudgetCategory) -> f64 {
        match category {
            BudgetCategory::Housing => self.housing,
            BudgetCategory::Food => self.food,
            BudgetCategory::Transportation => self.transportation,
            BudgetCategory::Utilities => self.utilities,
            BudgetCategory::Healthcare => self.healthcare,
            BudgetCategory::Entertainment => self.entertainment,
        }
    }
}

impl Default for CategoryMultipliers {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// City records carry no healthcare factor; it stays at the baseline
impl From<CostMultipliers> for CategoryMultipliers {
    fn from(city: CostMultipliers) -> Self {
        Self {
            housing: city.housing,
            food: city.food,
            transportation: city.transport,
            utilities: city.utilities,
            healthcare: 1.0,
            entertainment: city.entertainment,
        }
    }
}
