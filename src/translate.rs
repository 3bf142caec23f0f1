//! Translation of envelopes into labeled metric events. Only the three
//! metric-bearing variants translate; log lines, HTTP transactions and
//! platform errors are someone else's problem and yield nothing here.

use appinfo::AppInfoResolver;
use envelope::{Envelope, EventKind};
use labels::LabelMaker;
use metric::{Metric, MetricEvent};
use time;

/// Translate an envelope into a labeled `MetricEvent`, if its variant carries
/// metrics.
///
/// Sample names are prefixed with the emitting origin, so a `latency` reading
/// from `gorouter` becomes `gorouter.latency`. A counter's running total is
/// reported as `<origin>.<name>.total`. A container sample fans out into
/// cpu / memory / disk readings. Samples take the envelope's timestamp when
/// one was attached, else the current time.
pub fn metric_event<R>(maker: &LabelMaker<R>, envelope: &Envelope) -> Option<MetricEvent>
    where R: AppInfoResolver
{
    let time = envelope.timestamp.unwrap_or_else(time::now);
    let metrics = match envelope.event {
        EventKind::ValueMetric { ref name, value, ref unit } => {
            vec![Metric::new(format!("{}.{}", envelope.origin, name), value)
                     .time(time)
                     .unit(unit.clone())]
        }
        EventKind::CounterEvent { ref name, total } => {
            vec![Metric::new(format!("{}.{}.total", envelope.origin, name),
                             total as f64)
                     .time(time)]
        }
        EventKind::ContainerMetric { cpu_percentage, memory_bytes, disk_bytes, .. } => {
            vec![Metric::new(format!("{}.cpuPercentage", envelope.origin),
                             cpu_percentage)
                     .time(time),
                 Metric::new(format!("{}.memoryBytes", envelope.origin),
                             memory_bytes as f64)
                     .time(time),
                 Metric::new(format!("{}.diskBytes", envelope.origin),
                             disk_bytes as f64)
                     .time(time)]
        }
        EventKind::HttpStartStop { .. } |
        EventKind::LogMessage { .. } |
        EventKind::Error { .. } => {
            trace!("no metric translation for {:?} envelope from {}",
                   envelope.event.event_type(),
                   envelope.origin);
            return None;
        }
    };

    Some(MetricEvent {
        metrics: metrics,
        labels: maker.build(envelope),
        kind: envelope.event.event_type(),
    })
}
