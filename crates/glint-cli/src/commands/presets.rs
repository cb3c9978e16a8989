//! Effect listing command

use anyhow::Result;

pub fn run(library: Option<&str>) -> Result<()> {
    let library = super::load_library(library)?;

    println!("Effects ({}):", library.len());
    for name in library.names() {
        let config = library.get(name)?;
        let mode = if config.continuous {
            format!("{:.0}/s", config.emission_rate)
        } else {
            format!("{} x {}", config.burst_count, config.batch_size)
        };
        println!("  {:<18} {:<8} {}", name, config.kind, mode);
    }
    println!();
    println!("Composite: boost_trail (use `glint simulate --boost`)");

    Ok(())
}
