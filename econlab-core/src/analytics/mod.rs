//! Derived metrics — pure functions over series values.
//!
//! Nothing in here touches the filesystem or the catalog's storage; callers
//! pass values (and an indicator id where a business override applies) in and
//! get numbers or classifications out.

pub mod change;
pub mod correlation;
pub mod impact;
pub mod period;
pub mod trend;

pub use change::{ChangeMode, ChangeTone};
pub use correlation::CorrelationMatrix;
pub use impact::{Arrow, Impact, ImpactReading};
pub use period::TimePeriod;
pub use trend::{Trend, TrendReading};
