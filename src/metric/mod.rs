//! The metric data model: the tagmap that labels carry, the individual metric
//! sample and the labeled `MetricEvent` with its dedupe fingerprint.

mod event;
mod tagmap;

pub use self::event::{Metric, MetricEvent};
pub use self::tagmap::TagMap;
