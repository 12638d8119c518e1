//! `sections` command: list the built-in coastline sections.

use std::io::Write;

use surfcast_core::SectionRegistry;

use crate::CliError;

pub(crate) fn run_sections(writer: &mut dyn Write) -> Result<(), CliError> {
    write_sections(&SectionRegistry::san_diego(), writer)
}

/// One line per section: name, bounds (lat,lng corners), point count,
/// location factor and tide station.
pub(crate) fn write_sections(
    registry: &SectionRegistry,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    for section in registry.sections() {
        let south_west = section.bounds.min();
        let north_east = section.bounds.max();
        writeln!(
            writer,
            "{:<20} {:>8.4},{:>9.4} .. {:>8.4},{:>9.4}  {:>3} points  factor {:.2}  tide {}",
            section.name,
            south_west.y,
            south_west.x,
            north_east.y,
            north_east.x,
            registry.points_of(section).len(),
            registry.location_factor(&section.name),
            section.tide_station,
        )
        .map_err(CliError::WriteStdout)?;
    }
    Ok(())
}
