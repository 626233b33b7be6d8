use anyhow::{Context, Result, bail};
use mean_interp::{Bounds, Method, SplineParams};
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, fs, ops::RangeBounds, path::Path};

/// Input table layout.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// Column holding the period values.
    pub value_column: String,
    /// Column holding the number of samples in each period.
    pub length_column: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            value_column: "mean".to_string(),
            length_column: "time".to_string(),
        }
    }
}

/// Output table layout.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Column holding the interpolated samples.
    pub column: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            column: "mean_interpolated".to_string(),
        }
    }
}

/// Verification parameters.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VerifyConfig {
    /// Largest accepted deviation of a period mean from its period value.
    pub tol: f64,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self { tol: 0.01 }
    }
}

/// Interpolation configuration.
///
/// Loaded from a TOML file and validated before use; every section is
/// optional. See [`Config::from_file`] for loading.
#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub method: Method,
    pub verify: VerifyConfig,
}

impl Config {
    /// Load a [`Config`] from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;
        Self::from_toml(&contents)
    }

    /// Parse and validate a [`Config`] from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check_name(&self.input.value_column).context("invalid value column")?;
        check_name(&self.input.length_column).context("invalid length column")?;
        if self.input.value_column == self.input.length_column {
            bail!("value and length columns must differ");
        }
        check_name(&self.output.column).context("invalid output column")?;

        match self.method {
            Method::Autoregressive(Bounds { min_val, max_val }) => {
                if let (Some(min_val), Some(max_val)) = (min_val, max_val) {
                    check_num(min_val, ..=max_val).context("invalid minimum bound")?;
                }
            }
            Method::Spline(SplineParams { max_iter, tol }) => {
                check_num(max_iter, 1..=100_000).context("invalid maximum number of iterations")?;
                check_num(tol, f64::MIN_POSITIVE..1.0e6).context("invalid tolerance")?;
            }
        }
        self.method.validate().context("invalid method")?;

        check_num(self.verify.tol, f64::MIN_POSITIVE..1.0e6)
            .context("invalid verification tolerance")?;

        Ok(())
    }
}

pub fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}

fn check_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        bail!("column name must not be empty");
    }
    Ok(())
}
