//! Rendering of search results

use crate::cli::commands::OutputFormat;
use crate::error::Result;
use crate::search::PlaceRecord;
use comfy_table::{ContentArrangement, Table};

const NA: &str = "N/A";

/// Render records in the requested format
pub fn render(records: &[PlaceRecord], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let lines = records
                .iter()
                .map(serde_json::to_string)
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(lines.join("\n"))
        }
        OutputFormat::Pretty => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Table => Ok(render_table(records)),
    }
}

/// Render a name / rating / id / coordinates table
pub fn render_table(records: &[PlaceRecord]) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(["Name", "Rating", "Place ID", "Latitude", "Longitude"]);

    for record in records {
        table.add_row(table_row(record));
    }

    table.to_string()
}

fn table_row(record: &PlaceRecord) -> [String; 5] {
    let location = record.location();
    [
        record.name().unwrap_or(NA).to_string(),
        record
            .rating()
            .map_or_else(|| NA.to_string(), |r| r.to_string()),
        record.place_id().unwrap_or(NA).to_string(),
        location.map_or_else(|| NA.to_string(), |l| l.lat.to_string()),
        location.map_or_else(|| NA.to_string(), |l| l.lng.to_string()),
    ]
}
