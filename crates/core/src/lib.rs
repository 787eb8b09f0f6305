pub mod calculator;
pub mod domain;
pub mod errors;
pub mod money;
pub mod schedule;

pub use calculator::Calculator;
pub use domain::region::{BuyerType, Region};
pub use domain::result::{
    BandBreakdown, BandRange, BuyerTypeComparison, BuyerTypeSummary, CalculationResult,
    RegionComparison, RegionSummary,
};
pub use errors::DomainError;
pub use schedule::{RateBand, RateTable, RegionSchedule, Schedule, ScheduleError, TableKind};
