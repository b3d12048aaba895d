use anyhow::Result;
use owo_colors::OwoColorize;
use tour_core::booking::parse_date;
use tour_core::slot::slot_options;

pub fn run(date: &str, json: bool) -> Result<()> {
    let date = parse_date(date)?;
    let options = slot_options(Some(date));

    if json {
        println!("{}", serde_json::to_string_pretty(&options)?);
        return Ok(());
    }

    println!("{}", date.format("%A, %B %-d %Y").bold());
    // First entry is the "Select a time" placeholder
    for option in options.iter().skip(1) {
        if option.is_selectable() {
            println!("  {:>8}  {}", option.label, option.value.dimmed());
        } else {
            println!("  {}", option.label.yellow());
        }
    }

    Ok(())
}
