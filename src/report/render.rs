//! Plain-text table rendering of a run report.

use std::fmt::{self, Write};

use taxi_areas::Report;

const HEADERS: [&str; 5] = ["#", "Area", "Count", "Location", "Google Maps Link"];
/// Columns that are right-aligned
const NUMERIC: [bool; 5] = [true, false, true, false, false];

/// Render the report as a bordered table with a line between rows
pub fn render_table(report: &Report) -> Result<String, fmt::Error> {
    let rows: Vec<[String; 5]> = report
        .entries
        .iter()
        .map(|entry| {
            [
                entry.rank.to_string(),
                entry.aggregate.name.clone(),
                entry.aggregate.count.to_string(),
                entry.description.clone(),
                entry.maps_link(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let separator = {
        let mut line = String::from("+");
        for width in &widths {
            line.push_str(&"-".repeat(width + 2));
            line.push('+');
        }
        line
    };

    let mut out = String::new();
    writeln!(out, "Total Available Taxis: {}", report.total_points)?;
    writeln!(out, "{}", separator)?;
    writeln!(out, "{}", format_row(&HEADERS.map(String::from), &widths)?)?;
    writeln!(out, "{}", separator.replace('-', "="))?;
    for row in &rows {
        writeln!(out, "{}", format_row(row, &widths)?)?;
        writeln!(out, "{}", separator)?;
    }

    writeln!(
        out,
        "{} taxis outside every planning area",
        report.unassigned
    )?;
    if report.regions_without_boundary > 0 {
        writeln!(
            out,
            "{} of {} planning areas had no usable boundary",
            report.regions_without_boundary, report.region_count
        )?;
    }
    if let Some(ts) = report.fetched_at {
        writeln!(out, "Taxi data as of {}", ts.to_rfc3339())?;
    }

    Ok(out)
}

fn format_row(cells: &[String; 5], widths: &[usize; 5]) -> Result<String, fmt::Error> {
    let mut line = String::from("|");
    for ((cell, width), numeric) in cells.iter().zip(widths).zip(NUMERIC) {
        if numeric {
            write!(line, " {:>width$} |", cell, width = width)?;
        } else {
            write!(line, " {:<width$} |", cell, width = width)?;
        }
    }
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use taxi_areas::{EnrichedEntry, GeoPoint, RegionAggregate};

    fn report() -> Report {
        Report {
            fetched_at: None,
            total_points: 4,
            unassigned: 1,
            region_count: 2,
            regions_without_boundary: 0,
            entries: vec![EnrichedEntry {
                rank: 1,
                aggregate: RegionAggregate {
                    name: "BEDOK".to_string(),
                    count: 3,
                    centroid: GeoPoint::new(1.5, 103.5),
                },
                description: "Bedok North".to_string(),
                lookup_failed: false,
            }],
        }
    }

    #[test]
    fn test_render_contains_title_and_row() {
        let out = render_table(&report()).unwrap();
        assert!(out.starts_with("Total Available Taxis: 4\n"));
        assert!(out.contains("| BEDOK |"));
        assert!(out.contains("Bedok North"));
        assert!(out.contains("https://www.google.com/maps/search/?api=1&query=1.5,103.5"));
        assert!(out.contains("1 taxis outside every planning area"));
    }

    #[test]
    fn test_rows_have_equal_width() {
        let out = render_table(&report()).unwrap();
        let widths: Vec<usize> = out
            .lines()
            .filter(|l| l.starts_with('|') || l.starts_with('+'))
            .map(|l| l.chars().count())
            .collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_empty_report_has_header_only() {
        let mut report = report();
        report.entries.clear();
        let out = render_table(&report).unwrap();
        assert!(out.contains("| # | Area | Count | Location | Google Maps Link |"));
    }

    #[test]
    fn test_format_row_pads_and_aligns() {
        let cells = ["7", "BEDOK", "12", "x", "y"].map(String::from);
        let row = format_row(&cells, &[2, 6, 5, 1, 1]).unwrap();
        assert_eq!(row, "|  7 | BEDOK  |    12 | x | y |");
    }
}
