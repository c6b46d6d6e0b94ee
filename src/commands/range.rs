use anyhow::Result;
use farmcal_core::CalendarView;
use owo_colors::OwoColorize;

pub fn run(view: CalendarView) -> Result<()> {
    let span = view.span().map_err(|e| anyhow::anyhow!(e))?;
    let label = view.label().map_err(|e| anyhow::anyhow!(e))?;

    println!("{}", label.bold());
    println!("  View:   {}", view.granularity);
    println!("  From:   {}", span.start);
    println!("  To:     {}", span.end);
    println!("  Days:   {}", span.num_days());

    Ok(())
}
