use crate::config::{InputConfig, check_num};
use anyhow::{Context, Result, bail};
use csv::{Reader, StringRecord, Writer};
use mean_interp::PeriodSeries;
use std::path::Path;

/// Largest accepted number of samples in one period.
const MAX_PERIOD_LENGTH: f64 = 1.0e7;

/// Read a period table with one row per period.
///
/// # Errors
/// Returns an error if the file cannot be read, if a configured column is
/// missing, if a cell cannot be parsed or if the resulting series is invalid.
pub fn read_period_series<P: AsRef<Path>>(file: P, cfg: &InputConfig) -> Result<PeriodSeries> {
    let file = file.as_ref();
    let mut reader = Reader::from_path(file).with_context(|| format!("failed to open {file:?}"))?;

    let headers = reader.headers().context("failed to read header")?.clone();
    let i_val = find_column(&headers, &cfg.value_column)?;
    let i_len = find_column(&headers, &cfg.length_column)?;

    let mut values = Vec::new();
    let mut lengths = Vec::new();
    for (i_row, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("failed to read row {i_row}"))?;
        let val = parse_cell(&record, i_val)
            .with_context(|| format!("invalid value in row {i_row}"))?;
        let len = parse_cell(&record, i_len)
            .and_then(to_length)
            .with_context(|| format!("invalid length in row {i_row}"))?;
        values.push(val);
        lengths.push(len);
    }

    let series = PeriodSeries::new(values, lengths)
        .with_context(|| format!("invalid period series in {file:?}"))?;
    Ok(series)
}

/// Write `samples` as a single-column table.
pub fn write_samples<P: AsRef<Path>>(file: P, column: &str, samples: &[f64]) -> Result<()> {
    let file = file.as_ref();
    let mut writer = Writer::from_path(file).with_context(|| format!("failed to create {file:?}"))?;

    writer.write_record([column]).context("failed to write header")?;
    for val in samples {
        writer
            .write_record([val.to_string()])
            .context("failed to write sample")?;
    }

    writer.flush().context("failed to flush writer stream")?;

    Ok(())
}

/// Read a single column of samples written by [`write_samples`].
pub fn read_samples<P: AsRef<Path>>(file: P, column: &str) -> Result<Vec<f64>> {
    let file = file.as_ref();
    let mut reader = Reader::from_path(file).with_context(|| format!("failed to open {file:?}"))?;

    let headers = reader.headers().context("failed to read header")?.clone();
    let i_col = find_column(&headers, column)?;

    let mut samples = Vec::new();
    for (i_row, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("failed to read row {i_row}"))?;
        let val = parse_cell(&record, i_col)
            .with_context(|| format!("invalid sample in row {i_row}"))?;
        samples.push(val);
    }
    Ok(samples)
}

fn find_column(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|header| header.trim() == name)
        .with_context(|| format!("missing column {name:?}"))
}

fn parse_cell(record: &StringRecord, idx: usize) -> Result<f64> {
    let cell = record.get(idx).context("missing cell")?.trim();
    let val = cell
        .parse::<f64>()
        .with_context(|| format!("failed to parse {cell:?} as a number"))?;
    Ok(val)
}

fn to_length(len: f64) -> Result<usize> {
    // Lengths may be written as floats, e.g. "31.0".
    if !len.is_finite() || len < 1.0 || len.fract() != 0.0 {
        bail!("period length must be a positive integer, but is {len}");
    }
    check_num(len, 1.0..=MAX_PERIOD_LENGTH).context("period length is too large")?;
    Ok(len as usize)
}
