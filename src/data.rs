//! Dose-response observations and datasets.
//!
//! A [`DoseResponseData`] is an immutable, ordered collection of
//! [`Observation`]s. It can be built from parallel columns, from a CSV table
//! with `dose`, `response` and `total` columns, or simulated from known model
//! parameters. Resampling always produces a new dataset.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use rand::Rng;
use rand_distr::{Binomial, Distribution};
use serde::Serialize;

use crate::error::{Ld50Error, Result};
use crate::model::{logistic_response, ModelParams};

/// Header of the dose column.
pub const DOSE_COLUMN: &str = "dose";
/// Header of the response-count column.
pub const RESPONSE_COLUMN: &str = "response";
/// Header of the group-size column.
pub const TOTAL_COLUMN: &str = "total";

/// A single dose group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observation {
    /// Administered dose, finite and non-negative.
    pub dose: f64,
    /// Number of subjects exhibiting the response.
    pub response: u32,
    /// Number of subjects at this dose, always positive.
    pub total: u32,
}

impl Observation {
    /// Create a validated observation.
    pub fn new(dose: f64, response: u32, total: u32) -> Result<Self> {
        if !dose.is_finite() || dose < 0.0 {
            return Err(Ld50Error::InvalidInput(format!(
                "dose must be finite and non-negative, got {}",
                dose
            )));
        }
        if total == 0 {
            return Err(Ld50Error::InvalidInput(
                "total must be positive".to_string(),
            ));
        }
        if response > total {
            return Err(Ld50Error::InvalidInput(format!(
                "response count {} exceeds total {}",
                response, total
            )));
        }
        Ok(Self {
            dose,
            response,
            total,
        })
    }

    /// Observed response proportion `response / total`.
    pub fn proportion(&self) -> f64 {
        self.response as f64 / self.total as f64
    }
}

/// An immutable dose-response dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoseResponseData {
    observations: Vec<Observation>,
}

impl DoseResponseData {
    /// Build a dataset from parallel columns.
    ///
    /// # Arguments
    ///
    /// * `doses` - Administered doses
    /// * `responses` - Responding subjects per dose
    /// * `totals` - Subjects per dose
    ///
    /// # Returns
    ///
    /// * The dataset, or an error if the columns differ in length or any row is invalid
    pub fn new(doses: &[f64], responses: &[u32], totals: &[u32]) -> Result<Self> {
        if doses.len() != responses.len() || doses.len() != totals.len() {
            return Err(Ld50Error::DimensionMismatch(format!(
                "column lengths differ: {} doses, {} responses, {} totals",
                doses.len(),
                responses.len(),
                totals.len()
            )));
        }

        let observations = doses
            .iter()
            .zip(responses)
            .zip(totals)
            .map(|((&dose, &response), &total)| Observation::new(dose, response, total))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { observations })
    }

    /// Build a dataset from already constructed observations, re-validating each.
    pub fn from_observations(observations: Vec<Observation>) -> Result<Self> {
        for obs in &observations {
            Observation::new(obs.dose, obs.response, obs.total)?;
        }
        Ok(Self { observations })
    }

    /// Parse a comma-separated table with `dose`, `response` and `total` headers.
    ///
    /// Header names are matched exactly after trimming whitespace. Column order
    /// is free and additional columns are ignored. Counts may be written as
    /// integral reals such as `20.0`.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| Ld50Error::MissingColumn(name.to_string()))
        };
        let dose_idx = column(DOSE_COLUMN)?;
        let response_idx = column(RESPONSE_COLUMN)?;
        let total_idx = column(TOTAL_COLUMN)?;

        let mut observations = Vec::new();
        for (i, record) in rdr.records().enumerate() {
            let record = record?;
            let row = i + 1;
            let field = |idx: usize, name: &str| {
                record.get(idx).ok_or_else(|| Ld50Error::MalformedRow {
                    row,
                    message: format!("missing '{}' field", name),
                })
            };

            let dose = parse_real(field(dose_idx, DOSE_COLUMN)?, DOSE_COLUMN, row)?;
            let response =
                parse_count(field(response_idx, RESPONSE_COLUMN)?, RESPONSE_COLUMN, row)?;
            let total = parse_count(field(total_idx, TOTAL_COLUMN)?, TOTAL_COLUMN, row)?;

            let obs = Observation::new(dose, response, total).map_err(|e| {
                Ld50Error::MalformedRow {
                    row,
                    message: e.to_string(),
                }
            })?;
            observations.push(obs);
        }

        Ok(Self { observations })
    }

    /// Parse a CSV table held in memory.
    pub fn from_csv_str(text: &str) -> Result<Self> {
        Self::from_csv_reader(text.as_bytes())
    }

    /// Parse a CSV table from a file.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Simulate a dataset by drawing binomial response counts from the model.
    ///
    /// # Arguments
    ///
    /// * `params` - The generating model parameters
    /// * `doses` - Dose levels, one observation per level
    /// * `total` - Subjects per dose level
    /// * `rng` - Random number generator
    pub fn simulate<R: Rng + ?Sized>(
        params: ModelParams,
        doses: &[f64],
        total: u32,
        rng: &mut R,
    ) -> Result<Self> {
        let mut observations = Vec::with_capacity(doses.len());
        for &dose in doses {
            let p = logistic_response(params, dose);
            let binomial = Binomial::new(total as u64, p)
                .map_err(|e| Ld50Error::InvalidInput(format!("binomial p={}: {}", p, e)))?;
            let response = binomial.sample(rng) as u32;
            observations.push(Observation::new(dose, response, total)?);
        }
        Ok(Self { observations })
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the dataset holds no observations.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// The observations in input order.
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Dose column.
    pub fn doses(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.dose).collect()
    }

    /// Observed response proportions, one per observation.
    pub fn proportions(&self) -> Vec<f64> {
        self.observations
            .iter()
            .map(Observation::proportion)
            .collect()
    }

    /// Draw `n` observations uniformly with replacement, `n` being the dataset size.
    pub fn resample<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let n = self.observations.len();
        if n == 0 {
            return self.clone();
        }
        let observations = (0..n)
            .map(|_| self.observations[rng.gen_range(0..n)])
            .collect();
        Self { observations }
    }

    /// Whether the positive-dose rows show more than one observed proportion.
    ///
    /// Without variation the slope is not identifiable and any fitted ed50 is
    /// arbitrary.
    pub fn has_response_variation(&self) -> bool {
        let mut informative = self.observations.iter().filter(|o| o.dose > 0.0);
        let first = match informative.next() {
            Some(first) => first,
            None => return false,
        };
        // Compare r1/t1 with r2/t2 exactly by cross-multiplying.
        informative.any(|o| {
            o.response as u64 * first.total as u64 != first.response as u64 * o.total as u64
        })
    }
}

fn parse_real(text: &str, column: &str, row: usize) -> Result<f64> {
    text.parse::<f64>().map_err(|_| Ld50Error::MalformedRow {
        row,
        message: format!("invalid {} '{}'", column, text),
    })
}

fn parse_count(text: &str, column: &str, row: usize) -> Result<u32> {
    let value = parse_real(text, column, row)?;
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
        return Err(Ld50Error::MalformedRow {
            row,
            message: format!("{} must be a non-negative integer, got '{}'", column, text),
        });
    }
    Ok(value as u32)
}
