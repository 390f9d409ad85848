//! Static quick-add catalog.
//!
//! A fixed lookup table from food and portion to the nutrient delta that
//! portion contributes. Amounts are per portion: protein in grams, calcium,
//! zinc and boron in milligrams. The diet tracker consumes this table but
//! does not own it; lookups are pure functions over static data.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::tracker::Nutrients;

/// The quick-add foods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Food {
    RedMeat,
    Eggs,
    Milk,
    Yogurt,
    Almonds,
    Cashews,
    Raisins,
    Avocado,
    Cheese,
}

/// One selectable portion of a food.
#[derive(Debug, Clone, Copy)]
pub struct Portion {
    pub name: &'static str,
    pub nutrients: Nutrients,
}

macro_rules! portion {
    ($name:literal, $protein:literal, $calcium:literal, $zinc:literal, $boron:literal) => {
        Portion {
            name: $name,
            nutrients: Nutrients {
                protein: $protein,
                calcium: $calcium,
                zinc: $zinc,
                boron: $boron,
            },
        }
    };
}

impl Food {
    pub const ALL: [Food; 9] = [
        Food::RedMeat,
        Food::Eggs,
        Food::Milk,
        Food::Yogurt,
        Food::Almonds,
        Food::Cashews,
        Food::Raisins,
        Food::Avocado,
        Food::Cheese,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Food::RedMeat => "Red Meat",
            Food::Eggs => "Eggs",
            Food::Milk => "Milk",
            Food::Yogurt => "Yogurt",
            Food::Almonds => "Almonds",
            Food::Cashews => "Cashews",
            Food::Raisins => "Raisins",
            Food::Avocado => "Avocado",
            Food::Cheese => "Cheese",
        }
    }

    /// The fixed portion list for this food.
    pub fn portions(&self) -> &'static [Portion] {
        match self {
            Food::RedMeat => &[
                portion!("3 oz", 22.0, 15.0, 5.3, 0.0043),
                portion!("6 oz", 44.0, 30.0, 10.6, 0.0086),
            ],
            Food::Eggs => &[
                portion!("1 large", 6.0, 25.0, 0.5, 0.12),
                portion!("2 large", 12.0, 50.0, 1.0, 0.24),
                portion!("3 large", 18.0, 75.0, 1.5, 0.36),
            ],
            Food::Milk => &[
                portion!("1 cup", 8.0, 300.0, 1.0, 0.055),
                portion!("2 cups", 16.0, 600.0, 2.0, 0.11),
            ],
            Food::Yogurt => &[
                portion!("1 cup", 10.0, 450.0, 1.7, 0.001),
                portion!("½ cup", 5.0, 225.0, 0.85, 0.0005),
            ],
            Food::Almonds => &[
                portion!("1 oz", 6.0, 75.0, 0.9, 1.5792),
                portion!("¼ cup", 7.5, 94.0, 1.1, 1.974),
            ],
            Food::Cashews => &[
                portion!("1 oz", 5.0, 10.0, 1.6, 0.326),
                portion!("¼ cup", 6.25, 12.5, 2.0, 0.374),
            ],
            Food::Raisins => &[
                portion!("¼ cup", 1.0, 20.0, 0.1, 0.95),
                portion!("½ cup", 2.0, 40.0, 0.2, 1.9),
            ],
            Food::Avocado => &[
                portion!("½ avocado", 2.0, 12.0, 0.6, 0.642),
                portion!("1 avocado", 4.0, 24.0, 1.2, 1.284),
            ],
            Food::Cheese => &[
                portion!("1 oz", 7.0, 200.0, 0.9, 0.0054),
                portion!("2 oz", 14.0, 400.0, 1.8, 0.0108),
            ],
        }
    }
}

impl fmt::Display for Food {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Food::RedMeat => "red-meat",
            Food::Eggs => "eggs",
            Food::Milk => "milk",
            Food::Yogurt => "yogurt",
            Food::Almonds => "almonds",
            Food::Cashews => "cashews",
            Food::Raisins => "raisins",
            Food::Avocado => "avocado",
            Food::Cheese => "cheese",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Food {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(' ', "-").as_str() {
            "red-meat" | "redmeat" => Ok(Food::RedMeat),
            "eggs" => Ok(Food::Eggs),
            "milk" => Ok(Food::Milk),
            "yogurt" => Ok(Food::Yogurt),
            "almonds" => Ok(Food::Almonds),
            "cashews" => Ok(Food::Cashews),
            "raisins" => Ok(Food::Raisins),
            "avocado" => Ok(Food::Avocado),
            "cheese" => Ok(Food::Cheese),
            other => Err(ValidationError::InvalidValue {
                field: "food".to_string(),
                message: format!("unknown food '{other}'"),
            }),
        }
    }
}

/// Look up the nutrient delta for one portion of a food.
///
/// Accepts ASCII fraction spellings ("1/2 cup") for the unicode portion
/// names. Unknown portions yield `None`.
pub fn lookup_portion(food: Food, portion: &str) -> Option<Nutrients> {
    let wanted = portion.trim().replace("1/2", "½").replace("1/4", "¼");
    food.portions()
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(&wanted))
        .map(|p| p.nutrients)
}
