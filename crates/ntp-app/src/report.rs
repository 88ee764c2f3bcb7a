//! Summary rows, wall-temperature check, and tabular output for batch runs.

use ntp_model::SimulationResult;
use serde::Serialize;
use std::fmt::Write as _;
use std::io::{self, Write};

use crate::run_service::StudyRun;

/// Wall temperature against a material limit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WallCheck {
    pub limit_k: f64,
    pub max_wall_temperature_k: f64,
    /// Positive when the wall stays below the limit
    pub margin_k: f64,
}

impl WallCheck {
    pub fn evaluate(result: &SimulationResult, limit_k: f64) -> Self {
        let max_wall = result.thermal().max_wall_temperature_k();
        Self {
            limit_k,
            max_wall_temperature_k: max_wall,
            margin_k: limit_k - max_wall,
        }
    }

    pub fn within_limit(&self) -> bool {
        self.max_wall_temperature_k <= self.limit_k
    }
}

/// One line of a batch report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub reactor_name: String,
    /// `choked`, `unchoked`, `no_flow`, or `error`
    pub status: String,
    pub specific_impulse_s: f64,
    pub thrust_n: f64,
    pub exit_mach: f64,
    pub exit_gas_temperature_k: f64,
    pub max_wall_temperature_k: f64,
    pub wall_check: Option<WallCheck>,
    pub error: Option<String>,
}

impl SummaryRow {
    pub fn from_result(result: &SimulationResult, wall_limit_k: Option<f64>) -> Self {
        let nozzle = result.nozzle();
        Self {
            reactor_name: result.reactor_name().to_string(),
            status: nozzle.status.label().to_string(),
            specific_impulse_s: nozzle.specific_impulse_s,
            thrust_n: nozzle.thrust_n,
            exit_mach: nozzle.exit_mach,
            exit_gas_temperature_k: result.stagnation().temperature_k,
            max_wall_temperature_k: result.thermal().max_wall_temperature_k(),
            wall_check: wall_limit_k.map(|limit| WallCheck::evaluate(result, limit)),
            error: None,
        }
    }

    pub fn from_run(run: &StudyRun) -> Self {
        match &run.result {
            Ok(result) => Self::from_result(result, run.wall_temperature_limit_k),
            Err(err) => Self {
                reactor_name: run.reactor_name.clone(),
                status: "error".to_string(),
                specific_impulse_s: f64::NAN,
                thrust_n: f64::NAN,
                exit_mach: f64::NAN,
                exit_gas_temperature_k: f64::NAN,
                max_wall_temperature_k: f64::NAN,
                wall_check: None,
                error: Some(err.to_string()),
            },
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    fn wall_verdict(&self) -> &'static str {
        match self.wall_check {
            Some(check) if check.within_limit() => "ok",
            Some(_) => "EXCEEDED",
            None => "-",
        }
    }
}

pub fn summarize(runs: &[StudyRun]) -> Vec<SummaryRow> {
    runs.iter().map(SummaryRow::from_run).collect()
}

/// Fixed-width text table for terminal output.
pub fn render_table(rows: &[SummaryRow]) -> String {
    let name_width = rows
        .iter()
        .map(|r| r.reactor_name.chars().count())
        .max()
        .unwrap_or(0)
        .max("reactor".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<name_width$}  {:<9}  {:>9}  {:>12}  {:>6}  {:>10}  {:>10}  {:<8}",
        "reactor", "status", "Isp [s]", "thrust [N]", "Mach", "T_exit [K]", "T_wall [K]", "wall",
    );
    let _ = writeln!(out, "{}", "-".repeat(name_width + 78));
    for row in rows {
        if let Some(err) = &row.error {
            let _ = writeln!(
                out,
                "{:<name_width$}  {:<9}  {}",
                row.reactor_name, row.status, err
            );
            continue;
        }
        let _ = writeln!(
            out,
            "{:<name_width$}  {:<9}  {:>9.1}  {:>12.1}  {:>6.3}  {:>10.1}  {:>10.1}  {:<8}",
            row.reactor_name,
            row.status,
            row.specific_impulse_s,
            row.thrust_n,
            row.exit_mach,
            row.exit_gas_temperature_k,
            row.max_wall_temperature_k,
            row.wall_verdict(),
        );
    }
    out
}

pub const SUMMARY_CSV_HEADER: &str = "reactor_name,status,isp_s,thrust_n,exit_mach,\
exit_gas_temperature_k,max_wall_temperature_k,wall_limit_k,wall_margin_k,error";

/// Write rows as CSV. Error rows leave the numeric columns empty.
pub fn write_summary_csv<W: Write>(mut writer: W, rows: &[SummaryRow]) -> io::Result<()> {
    writeln!(writer, "{}", SUMMARY_CSV_HEADER)?;
    for row in rows {
        let numbers = if row.is_error() {
            ",,,,".to_string()
        } else {
            format!(
                "{},{},{},{},{}",
                row.specific_impulse_s,
                row.thrust_n,
                row.exit_mach,
                row.exit_gas_temperature_k,
                row.max_wall_temperature_k
            )
        };
        let (limit, margin) = match row.wall_check {
            Some(check) => (check.limit_k.to_string(), check.margin_k.to_string()),
            None => (String::new(), String::new()),
        };
        writeln!(
            writer,
            "{},{},{},{},{},{}",
            csv_field(&row.reactor_name),
            row.status,
            numbers,
            limit,
            margin,
            csv_field(row.error.as_deref().unwrap_or("")),
        )?;
    }
    Ok(())
}

/// Quote a CSV field when it contains a delimiter, quote, or newline.
pub(crate) fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn error_row_renders_message() {
        let row = SummaryRow {
            reactor_name: "broken".to_string(),
            status: "error".to_string(),
            specific_impulse_s: f64::NAN,
            thrust_n: f64::NAN,
            exit_mach: f64::NAN,
            exit_gas_temperature_k: f64::NAN,
            max_wall_temperature_k: f64::NAN,
            wall_check: None,
            error: Some("Model error: bad".to_string()),
        };
        let table = render_table(std::slice::from_ref(&row));
        assert!(table.contains("broken"));
        assert!(table.contains("Model error: bad"));

        let mut buf = Vec::new();
        write_summary_csv(&mut buf, &[row]).unwrap();
        let csv = String::from_utf8(buf).unwrap();
        let line = csv.lines().nth(1).unwrap();
        assert_eq!(line, "broken,error,,,,,,,,Model error: bad");
        assert_eq!(line.split(',').count(), SUMMARY_CSV_HEADER.split(',').count());
    }
}
