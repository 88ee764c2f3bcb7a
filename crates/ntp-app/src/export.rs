//! File export of simulation results.

use ntp_model::SimulationResult;
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

use crate::error::{AppError, AppResult};
use crate::report::{SummaryRow, write_summary_csv};

pub const PROFILE_CSV_HEADER: &str = "x_m,q_w,t_gas_k,t_wall_k";

/// Axial profile as CSV, one line per slice.
pub fn write_profile_csv<W: Write>(mut writer: W, result: &SimulationResult) -> io::Result<()> {
    let thermal = result.thermal();
    writeln!(writer, "{}", PROFILE_CSV_HEADER)?;
    for (((x, q), t_gas), t_wall) in result
        .positions_m()
        .iter()
        .zip(result.power_profile().power_w())
        .zip(thermal.gas_temperature_k())
        .zip(thermal.wall_temperature_k())
    {
        writeln!(writer, "{},{},{},{}", x, q, t_gas, t_wall)?;
    }
    Ok(())
}

pub fn save_profile_csv(path: &Path, result: &SimulationResult) -> AppResult<()> {
    write_file(path, |w| write_profile_csv(w, result))
}

pub fn save_summary_csv(path: &Path, rows: &[SummaryRow]) -> AppResult<()> {
    write_file(path, |w| write_summary_csv(w, rows))
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Full result, including profiles, as pretty JSON.
pub fn save_result_json(path: &Path, result: &SimulationResult) -> AppResult<()> {
    let json = to_json(result)?;
    std::fs::write(path, json).map_err(|source| AppError::OutputFileWrite {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file<F>(path: &Path, write: F) -> AppResult<()>
where
    F: FnOnce(&mut io::BufWriter<std::fs::File>) -> io::Result<()>,
{
    let to_app = |source| AppError::OutputFileWrite {
        path: path.to_path_buf(),
        source,
    };
    let file = std::fs::File::create(path).map_err(to_app)?;
    let mut writer = io::BufWriter::new(file);
    write(&mut writer).map_err(to_app)?;
    writer.flush().map_err(to_app)?;
    Ok(())
}
