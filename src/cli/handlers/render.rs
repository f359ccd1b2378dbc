//! Output helpers shared by command handlers

use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::output::Formattable;
use crate::output::json::format_json_with_error;
use crate::output::table::format_details;

/// Print rows; in JSON a load error travels in `meta.error` next to the fallback rows
pub fn print_rows<D: Tabled + Serialize>(
    format: OutputFormat,
    rows: Vec<D>,
    error: Option<&str>,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", format_json_with_error(&rows, error)?);
            Ok(())
        }
        OutputFormat::Pretty | OutputFormat::Table => rows.print(format),
    }
}

/// Print one record as field/value pairs, or `data` itself in JSON
pub fn print_details<S: Serialize + ?Sized>(
    format: OutputFormat,
    pairs: &[(String, String)],
    data: &S,
    error: Option<&str>,
) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", format_json_with_error(data, error)?),
        OutputFormat::Pretty | OutputFormat::Table => println!("{}", format_details(pairs)),
    }
    Ok(())
}
