use clap::Subcommand;
use nutrify_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one configuration value, e.g. `diet.protein`
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
    /// Print the whole configuration as JSON
    List,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            println!("{}", config.get(&key)?);
            Ok(())
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            println!("{}", config.get(&key)?);
            Ok(())
        }
        ConfigAction::List => {
            let config = Config::load()?;
            super::print_snapshot(&config)
        }
    }
}
