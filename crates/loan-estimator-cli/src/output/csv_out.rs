use loan_estimator_core::schedule::ScheduleRow;
use loan_estimator_core::format_money;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

pub const SCHEDULE_HEADER: [&str; 6] = [
    "Installment",
    "OpeningBalance",
    "EMI",
    "PrincipalComponent",
    "InterestComponent",
    "ClosingBalance",
];

/// Write a repayment schedule as CSV, amounts fixed at two decimals.
pub fn write_schedule<W: io::Write>(rows: &[ScheduleRow], writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(SCHEDULE_HEADER)?;

    for row in rows {
        wtr.write_record([
            row.installment.to_string(),
            format_money(row.opening_balance),
            format_money(row.payment),
            format_money(row.principal_component),
            format_money(row.interest_component),
            format_money(row.closing_balance),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Create (or truncate) `path` and write the schedule into it.
pub fn export_schedule(rows: &[ScheduleRow], path: &Path) -> Result<(), csv::Error> {
    let file = File::create(path)?;
    write_schedule(rows, BufWriter::new(file))
}
