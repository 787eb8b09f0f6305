use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::region::Region;

/// One marginal band: the slice of price up to `up_to` is taxed at `rate`.
/// `up_to = None` marks the open-ended final band of a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RateBand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub up_to: Option<Decimal>,
    pub rate: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable {
    bands: Vec<RateBand>,
}

impl RateTable {
    pub fn new(bands: Vec<RateBand>) -> Self {
        Self { bands }
    }

    pub fn bands(&self) -> &[RateBand] {
        &self.bands
    }
}

/// Rate tables and surcharge for one region. `first_time` replaces the
/// standard table for eligible first-time buyers; `first_time_cap` is the
/// price above which that relief no longer applies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionSchedule {
    pub standard: RateTable,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_time: Option<RateTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_time_cap: Option<Decimal>,
    pub surcharge: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub tax_year: String,
    england: RegionSchedule,
    scotland: RegionSchedule,
    wales: RegionSchedule,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableKind {
    Standard,
    FirstTime,
}

impl fmt::Display for TableKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Standard => formatter.write_str("standard"),
            TableKind::FirstTime => formatter.write_str("first-time"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("could not read schedule file `{path}`: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse schedule file `{path}`: {source}")]
    ParseFile {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("could not parse schedule document: {source}")]
    Parse {
        #[source]
        source: toml::de::Error,
    },
    #[error("{region} {table} table has no bands")]
    EmptyTable { region: Region, table: TableKind },
    #[error("{region} {table} table rate {rate} is out of range (expected 0 <= rate < 1)")]
    RateOutOfRange { region: Region, table: TableKind, rate: Decimal },
    #[error("{region} {table} table thresholds must rise strictly; {threshold} does not")]
    NonAscendingThreshold { region: Region, table: TableKind, threshold: Decimal },
    #[error("{region} {table} table has bands after its open-ended band")]
    BandAfterOpenEnd { region: Region, table: TableKind },
    #[error("{region} standard table must end with an open-ended band")]
    BoundedFinalBand { region: Region },
    #[error("{region} first-time table ends at {table_end} and needs a price cap at or below it")]
    ReliefCapRequired { region: Region, table_end: Decimal },
    #[error("{region} first-time price cap {cap} lies beyond the table end {table_end}")]
    ReliefCapBeyondTable { region: Region, cap: Decimal, table_end: Decimal },
    #[error("{region} first-time price cap {cap} must be positive")]
    NonPositiveCap { region: Region, cap: Decimal },
    #[error("{region} has a first-time price cap but no first-time table")]
    CapWithoutReliefTable { region: Region },
    #[error("{region} surcharge {rate} is out of range (expected 0 <= rate < 1)")]
    SurchargeOutOfRange { region: Region, rate: Decimal },
}

impl Schedule {
    /// The published 2024/25 tables for SDLT, LBTT, and LTT.
    pub fn builtin() -> Self {
        Self {
            tax_year: "2024/25".to_owned(),
            england: RegionSchedule {
                standard: RateTable::new(vec![
                    band(250_000, Decimal::ZERO),
                    band(925_000, Decimal::new(5, 2)),
                    band(1_500_000, Decimal::new(10, 2)),
                    open_band(Decimal::new(12, 2)),
                ]),
                first_time: Some(RateTable::new(vec![
                    band(425_000, Decimal::ZERO),
                    band(625_000, Decimal::new(5, 2)),
                ])),
                first_time_cap: Some(Decimal::from(625_000)),
                surcharge: Decimal::new(5, 2),
            },
            scotland: RegionSchedule {
                standard: RateTable::new(vec![
                    band(145_000, Decimal::ZERO),
                    band(250_000, Decimal::new(2, 2)),
                    band(325_000, Decimal::new(5, 2)),
                    band(750_000, Decimal::new(10, 2)),
                    open_band(Decimal::new(12, 2)),
                ]),
                first_time: Some(RateTable::new(vec![
                    band(175_000, Decimal::ZERO),
                    band(250_000, Decimal::new(2, 2)),
                    band(325_000, Decimal::new(5, 2)),
                    band(750_000, Decimal::new(10, 2)),
                    open_band(Decimal::new(12, 2)),
                ])),
                first_time_cap: None,
                surcharge: Decimal::new(6, 2),
            },
            wales: RegionSchedule {
                standard: RateTable::new(vec![
                    band(225_000, Decimal::ZERO),
                    band(400_000, Decimal::new(6, 2)),
                    band(750_000, Decimal::new(75, 3)),
                    band(1_500_000, Decimal::new(10, 2)),
                    open_band(Decimal::new(12, 2)),
                ]),
                first_time: None,
                first_time_cap: None,
                surcharge: Decimal::new(4, 2),
            },
        }
    }

    /// Builtin tables, optionally overlaid with a TOML file.
    pub fn load(path: Option<&Path>) -> Result<Self, ScheduleError> {
        match path {
            Some(path) => Self::from_toml_path(path),
            None => Ok(Self::builtin()),
        }
    }

    pub fn from_toml_path(path: &Path) -> Result<Self, ScheduleError> {
        let document = fs::read_to_string(path)
            .map_err(|source| ScheduleError::ReadFile { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&document).map_err(|error| match error {
            ScheduleError::Parse { source } => {
                ScheduleError::ParseFile { path: path.to_path_buf(), source }
            }
            other => other,
        })
    }

    /// Applies a TOML document on top of the builtin tables. Only the keys
    /// present in the document change; a `first_time` table replaces the
    /// relief wholesale, so pair it with `first_time_cap` when it is
    /// bounded. The merged schedule is validated before it is returned.
    pub fn from_toml_str(document: &str) -> Result<Self, ScheduleError> {
        let patch: SchedulePatch =
            toml::from_str(document).map_err(|source| ScheduleError::Parse { source })?;
        let mut schedule = Self::builtin();
        if let Some(tax_year) = patch.tax_year {
            schedule.tax_year = tax_year;
        }
        if let Some(region_patch) = patch.england {
            schedule.england.apply(region_patch);
        }
        if let Some(region_patch) = patch.scotland {
            schedule.scotland.apply(region_patch);
        }
        if let Some(region_patch) = patch.wales {
            schedule.wales.apply(region_patch);
        }
        schedule.validate()?;
        Ok(schedule)
    }

    pub fn region(&self, region: Region) -> &RegionSchedule {
        match region {
            Region::England => &self.england,
            Region::Scotland => &self.scotland,
            Region::Wales => &self.wales,
        }
    }

    pub fn validate(&self) -> Result<(), ScheduleError> {
        for region in Region::ALL {
            self.region(region).validate(region)?;
        }
        Ok(())
    }
}

impl RegionSchedule {
    fn validate(&self, region: Region) -> Result<(), ScheduleError> {
        let standard_end = validate_table(region, TableKind::Standard, self.standard.bands())?;
        if standard_end.is_some() {
            return Err(ScheduleError::BoundedFinalBand { region });
        }

        match (&self.first_time, self.first_time_cap) {
            (Some(table), cap) => {
                let table_end = validate_table(region, TableKind::FirstTime, table.bands())?;
                if let Some(cap) = cap {
                    if cap <= Decimal::ZERO {
                        return Err(ScheduleError::NonPositiveCap { region, cap });
                    }
                    if let Some(table_end) = table_end {
                        if cap > table_end {
                            return Err(ScheduleError::ReliefCapBeyondTable {
                                region,
                                cap,
                                table_end,
                            });
                        }
                    }
                } else if let Some(table_end) = table_end {
                    return Err(ScheduleError::ReliefCapRequired { region, table_end });
                }
            }
            (None, Some(_)) => return Err(ScheduleError::CapWithoutReliefTable { region }),
            (None, None) => {}
        }

        if self.surcharge < Decimal::ZERO || self.surcharge >= Decimal::ONE {
            return Err(ScheduleError::SurchargeOutOfRange { region, rate: self.surcharge });
        }
        Ok(())
    }

    fn apply(&mut self, patch: RegionPatch) {
        if let Some(bands) = patch.standard {
            self.standard = RateTable::new(bands);
        }
        if let Some(bands) = patch.first_time {
            self.first_time = Some(RateTable::new(bands));
            self.first_time_cap = patch.first_time_cap;
        } else if let Some(cap) = patch.first_time_cap {
            self.first_time_cap = Some(cap);
        }
        if let Some(surcharge) = patch.surcharge {
            self.surcharge = surcharge;
        }
    }
}

/// Walks a table checking ordering and rate ranges; returns the final
/// threshold, `None` when the table ends open.
fn validate_table(
    region: Region,
    table: TableKind,
    bands: &[RateBand],
) -> Result<Option<Decimal>, ScheduleError> {
    if bands.is_empty() {
        return Err(ScheduleError::EmptyTable { region, table });
    }
    let mut previous = Decimal::ZERO;
    let mut end = None;
    for (index, entry) in bands.iter().enumerate() {
        if entry.rate < Decimal::ZERO || entry.rate >= Decimal::ONE {
            return Err(ScheduleError::RateOutOfRange { region, table, rate: entry.rate });
        }
        match entry.up_to {
            Some(threshold) => {
                if threshold <= previous {
                    return Err(ScheduleError::NonAscendingThreshold { region, table, threshold });
                }
                previous = threshold;
                end = Some(threshold);
            }
            None => {
                if index + 1 != bands.len() {
                    return Err(ScheduleError::BandAfterOpenEnd { region, table });
                }
                end = None;
            }
        }
    }
    Ok(end)
}

fn band(up_to: i64, rate: Decimal) -> RateBand {
    RateBand { up_to: Some(Decimal::from(up_to)), rate }
}

fn open_band(rate: Decimal) -> RateBand {
    RateBand { up_to: None, rate }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SchedulePatch {
    tax_year: Option<String>,
    england: Option<RegionPatch>,
    scotland: Option<RegionPatch>,
    wales: Option<RegionPatch>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegionPatch {
    standard: Option<Vec<RateBand>>,
    first_time: Option<Vec<RateBand>>,
    first_time_cap: Option<Decimal>,
    surcharge: Option<Decimal>,
}
