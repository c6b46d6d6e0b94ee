use anyhow::Result;
use farmcal_core::config::CalendarConfig;
use owo_colors::OwoColorize;

pub fn run(init: bool) -> Result<()> {
    let config_path = CalendarConfig::config_path().map_err(|e| anyhow::anyhow!(e))?;

    if init && !config_path.exists() {
        CalendarConfig::create_default_config(&config_path).map_err(|e| anyhow::anyhow!(e))?;
        println!("{} {}", "Created".green(), config_path.display());
    }

    let config = CalendarConfig::load_from(&config_path).map_err(|e| anyhow::anyhow!(e))?;

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    if !config_path.exists() {
        println!("  {}", "(not created yet, run `farmcal config --init`)".dimmed());
    }

    println!();
    println!("{}", "Settings".bold());
    println!("  Daylight:   {:02}:00 - {:02}:00", config.sunrise_hour, config.sunset_hour);
    println!("  View:       {}", config.default_view);
    println!(
        "  Events:     {}",
        match (&config.events_file, &config.events_url) {
            (Some(path), _) => path.display().to_string(),
            (None, Some(url)) => url.clone(),
            (None, None) => "(none)".dimmed().to_string(),
        }
    );

    if let Err(e) = config.daylight() {
        println!("  {}", e.to_string().red());
    }

    Ok(())
}
