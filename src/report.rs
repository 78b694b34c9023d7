use std::path::Path;

use chrono::NaiveDate;
use rust_xlsxwriter::{Color, Format, Workbook};

use crate::error::Result;
use crate::matching::ComparisonRow;

/// How a price difference reads from our side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// We are cheaper (difference < 0)
    Favorable,
    /// We are more expensive (difference > 0)
    Unfavorable,
    /// Same price
    Neutral,
}

/// Classify a present difference. Absent differences get no verdict and no
/// highlight - that decision stays with the caller.
pub fn classify(difference: i64) -> Verdict {
    match difference.signum() {
        -1 => Verdict::Favorable,
        1 => Verdict::Unfavorable,
        _ => Verdict::Neutral,
    }
}

// Fill colors for the difference column
const FAVORABLE_FILL: Color = Color::RGB(0xC6EFCE); // green
const UNFAVORABLE_FILL: Color = Color::RGB(0xFFC7CE); // red
const NEUTRAL_FILL: Color = Color::RGB(0xE7E6E6); // gray

fn verdict_fill(verdict: Verdict) -> Color {
    match verdict {
        Verdict::Favorable => FAVORABLE_FILL,
        Verdict::Unfavorable => UNFAVORABLE_FILL,
        Verdict::Neutral => NEUTRAL_FILL,
    }
}

/// Report filename for a given calendar date. Re-running on the same day
/// overwrites that day's file.
pub fn report_filename(date: NaiveDate) -> String {
    format!("comparison_{}.xlsx", date.format("%Y-%m-%d"))
}

/// Write the comparison report: a header row, one data row per comparison
/// row in input order, and a color-coded difference column.
pub fn write_report(rows: &[ComparisonRow], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let header_format = Format::new().set_bold();

    worksheet.set_column_width(0, 48)?;
    worksheet.set_column_width(1, 14)?;
    worksheet.set_column_width(2, 16)?;
    worksheet.set_column_width(3, 12)?;

    worksheet.write_string_with_format(0, 0, "Item", &header_format)?;
    worksheet.write_string_with_format(0, 1, "Our Price", &header_format)?;
    worksheet.write_string_with_format(0, 2, "Competitor Price", &header_format)?;
    worksheet.write_string_with_format(0, 3, "Difference", &header_format)?;

    for (i, row) in rows.iter().enumerate() {
        let excel_row = (i + 1) as u32;

        worksheet.write_string(excel_row, 0, &row.title)?;
        worksheet.write_number(excel_row, 1, row.our_price as f64)?;

        if let Some(competitor_price) = row.competitor_price {
            worksheet.write_number(excel_row, 2, competitor_price as f64)?;
        }

        if let Some(difference) = row.difference {
            let fill = Format::new().set_background_color(verdict_fill(classify(difference)));
            worksheet.write_number_with_format(excel_row, 3, difference as f64, &fill)?;
        }
    }

    workbook.save(path)?;
    Ok(())
}
