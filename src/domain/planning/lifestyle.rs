use serde::{Deserialize, Serialize};

use super::category::BudgetCategory;

/// Spending level a plan is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifestyleLevel {
    Budget,
    #[default]
    Comfort,
    Premium,
}

impl LifestyleLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifestyleLevel::Budget => "budget",
            LifestyleLevel::Comfort => "comfort",
            LifestyleLevel::Premium => "premium",
        }
    }

    /// Monthly cost for one person in EUR before any location adjustment
    pub fn monthly_base_eur(&self, category: BudgetCategory) -> f64 {
        use BudgetCategory::*;

        match (self, category) {
            (LifestyleLevel::Budget, Housing) => 400.0,
            (LifestyleLevel::Budget, Food) => 250.0,
            (LifestyleLevel::Budget, Transportation) => 80.0,
            (LifestyleLevel::Budget, Utilities) => 50.0,
            (LifestyleLevel::Budget, Healthcare) => 40.0,
            (LifestyleLevel::Budget, Entertainment) => 60.0,

            (LifestyleLevel::Comfort, Housing) => 700.0,
            (LifestyleLevel::Comfort, Food) => 400.0,
            (LifestyleLevel::Comfort, Transportation) => 150.0,
            (LifestyleLevel::Comfort, Utilities) => 80.0,
            (LifestyleLevel::Comfort, Healthcare) => 80.0,
            (LifestyleLevel::Comfort, Entertainment) => 120.0,

            (LifestyleLevel::Premium, Housing) => 1200.0,
            (LifestyleLevel::Premium, Food) => 600.0,
            (LifestyleLevel::Premium, Transportation) => 250.0,
            (LifestyleLevel::Premium, Utilities) => 120.0,
            (LifestyleLevel::Premium, Healthcare) => 150.0,
            (LifestyleLevel::Premium, Entertainment) => 200.0,
        }
    }
}

impl std::fmt::Display for LifestyleLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monthly_total(level: LifestyleLevel) -> f64 {
        BudgetCategory::ALL
            .iter()
            .map(|c| level.monthly_base_eur(*c))
            .sum()
    }

    #[test]
    fn test_monthly_totals_per_level() {
        assert_eq!(monthly_total(LifestyleLevel::Budget), 880.0);
        assert_eq!(monthly_total(LifestyleLevel::Comfort), 1530.0);
        assert_eq!(monthly_total(LifestyleLevel::Premium), 2520.0);
    }

    #[test]
    fn test_default_is_comfort() {
        assert_eq!(LifestyleLevel::default(), LifestyleLevel::Comfort);
        assert_eq!(
            serde_json::from_str::<LifestyleLevel>("\"premium\"").unwrap(),
            LifestyleLevel::Premium
        );
    }
}
