use crate::config::Config;
use crate::table::{read_period_series, read_samples, write_samples};
use anyhow::{Context, Result, bail};
use glob::glob;
use mean_interp::{DeviationReport, LogObserver};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub struct Manager {
    cfg: Config,
}

impl Manager {
    pub fn new<P: AsRef<Path>>(config_file: Option<P>) -> Result<Self> {
        let cfg = match config_file {
            Some(config_file) => {
                Config::from_file(config_file.as_ref()).context("failed to construct cfg")?
            }
            None => Config::default(),
        };
        log::info!("{cfg:#?}");

        Ok(Self { cfg })
    }

    pub fn interpolate_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_file: P,
        output_file: Q,
    ) -> Result<()> {
        let input_file = input_file.as_ref();
        let output_file = output_file.as_ref();

        let series = read_period_series(input_file, &self.cfg.input)
            .with_context(|| format!("failed to read {input_file:?}"))?;
        log::info!(
            "read {} periods ({} samples) from {input_file:?}",
            series.n_periods(),
            series.n_samples()
        );

        let samples = self
            .cfg
            .method
            .interpolate(&series, &mut LogObserver)
            .context("failed to interpolate series")?;

        write_samples(output_file, &self.cfg.output.column, &samples)
            .with_context(|| format!("failed to write {output_file:?}"))?;
        log::info!("wrote {output_file:?}");

        Ok(())
    }

    pub fn interpolate_dir<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_dir: P,
        output_dir: Q,
    ) -> Result<()> {
        let input_dir = input_dir.as_ref();
        let output_dir = output_dir.as_ref();
        if input_dir == output_dir {
            bail!("input and output directories must differ");
        }

        let input_files = list_tables(input_dir).context("failed to list input files")?;
        if input_files.is_empty() {
            log::warn!("no tables found in {input_dir:?}");
            return Ok(());
        }

        fs::create_dir_all(output_dir)
            .with_context(|| format!("failed to create {output_dir:?}"))?;

        for (i_file, input_file) in input_files.iter().enumerate() {
            let file_name = input_file
                .file_name()
                .with_context(|| format!("{input_file:?} has no file name"))?;
            self.interpolate_file(input_file, output_dir.join(file_name))
                .with_context(|| format!("failed to process {input_file:?}"))?;

            let progress = 100.0 * (i_file + 1) as f64 / input_files.len() as f64;
            log::info!("completed {progress:06.2}%");
        }

        Ok(())
    }

    pub fn verify_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_file: P,
        output_file: Q,
    ) -> Result<DeviationReport> {
        let input_file = input_file.as_ref();
        let output_file = output_file.as_ref();

        let series = read_period_series(input_file, &self.cfg.input)
            .with_context(|| format!("failed to read {input_file:?}"))?;
        let samples = read_samples(output_file, &self.cfg.output.column)
            .with_context(|| format!("failed to read {output_file:?}"))?;

        let report =
            DeviationReport::compute(&series, &samples).context("failed to compare means")?;
        log::info!("{report:#?}");

        let tol = self.cfg.verify.tol;
        if report.max_abs_dev > tol {
            bail!(
                "period means deviate by up to {}, which exceeds the tolerance {tol}",
                report.max_abs_dev
            );
        }

        Ok(report)
    }
}

fn list_tables(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = dir.join("*.csv");
    let pattern = pattern.to_str().context("pattern is not valid UTF-8")?;
    let mut files: Vec<_> = glob(pattern)
        .context("failed to glob tables")?
        .filter_map(Result::ok)
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    Ok(files)
}
