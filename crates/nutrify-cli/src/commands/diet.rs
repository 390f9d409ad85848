use clap::Subcommand;
use nutrify_core::{lookup_portion, Config, Database, DayKey, DietTracker, Food, Nutrients};

#[derive(Subcommand)]
pub enum DietAction {
    /// Log a portion: a catalog food or custom nutrient amounts
    Add {
        /// Catalog food name (see `diet foods`)
        #[arg(long)]
        food: Option<String>,
        /// Portion name for the chosen food, e.g. "2 large"
        #[arg(long)]
        portion: Option<String>,
        /// Custom protein grams
        #[arg(long, default_value_t = 0.0)]
        protein: f64,
        /// Custom calcium milligrams
        #[arg(long, default_value_t = 0.0)]
        calcium: f64,
        /// Custom zinc milligrams
        #[arg(long, default_value_t = 0.0)]
        zinc: f64,
        /// Custom boron milligrams
        #[arg(long, default_value_t = 0.0)]
        boron: f64,
    },
    /// List quick-add foods and their portions
    Foods,
    /// Print today's totals, targets and streak as JSON
    Status,
}

pub fn run(action: DietAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        DietAction::Foods => {
            // Pure catalog listing; no store access needed.
            let listing: Vec<_> = Food::ALL
                .iter()
                .map(|food| {
                    serde_json::json!({
                        "food": food.to_string(),
                        "label": food.label(),
                        "portions": food
                            .portions()
                            .iter()
                            .map(|p| serde_json::json!({
                                "name": p.name,
                                "nutrients": p.nutrients,
                            }))
                            .collect::<Vec<_>>(),
                    })
                })
                .collect();
            super::print_snapshot(&listing)
        }
        DietAction::Status => {
            let db = Database::open()?;
            let config = Config::load()?;
            let (tracker, events) = DietTracker::load(&db, config.diet, DayKey::today());
            super::report_events(&events)?;
            super::print_snapshot(&tracker.snapshot())
        }
        DietAction::Add {
            food,
            portion,
            protein,
            calcium,
            zinc,
            boron,
        } => {
            let delta = match (food, portion) {
                (Some(food), Some(portion)) => {
                    let food: Food = food.parse()?;
                    lookup_portion(food, &portion).ok_or_else(|| {
                        let names: Vec<&str> =
                            food.portions().iter().map(|p| p.name).collect();
                        format!(
                            "unknown portion '{portion}' for {} (one of: {})",
                            food.label(),
                            names.join(", ")
                        )
                    })?
                }
                (Some(food), None) => {
                    let food: Food = food.parse()?;
                    let names: Vec<&str> = food.portions().iter().map(|p| p.name).collect();
                    return Err(format!(
                        "--portion is required for {} (one of: {})",
                        food.label(),
                        names.join(", ")
                    )
                    .into());
                }
                (None, Some(_)) => {
                    return Err("--food is required when --portion is given".into());
                }
                (None, None) => Nutrients {
                    protein,
                    calcium,
                    zinc,
                    boron,
                },
            };

            let db = Database::open()?;
            let config = Config::load()?;
            let today = DayKey::today();
            let (mut tracker, events) = DietTracker::load(&db, config.diet, today);
            super::report_events(&events)?;

            let events = tracker.add_portion(&db, &delta, today)?;
            super::report_events(&events)?;
            super::print_snapshot(&tracker.snapshot())
        }
    }
}
