use envelope::EventType;
use metric::TagMap;

/// A single metric sample: a name, a float value and the time it was
/// observed. `unit` is whatever the platform reported and may be empty.
// TODO should an empty unit default to the dimensionless unit "1"? Left empty
// until the backend's contract says otherwise.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    /// The metric name, e.g. `gorouter.latency`.
    pub name: String,
    /// The sampled value.
    pub value: f64,
    /// The sample time, in the units of `time::now()`.
    pub time: i64,
    /// The unit the platform reported for the value, possibly empty.
    pub unit: String,
}

impl Metric {
    /// Create a new sample with an empty unit, stamped at `time` 0. A sample
    /// must have at least a name and a value; the rest may be delayed behind
    /// them.
    ///
    /// # Examples
    /// ```
    /// use nozzle::metric::Metric;
    ///
    /// let m = Metric::new("gorouter.latency", 0.25);
    ///
    /// assert_eq!(m.name, "gorouter.latency");
    /// assert_eq!(m.value, 0.25);
    /// assert_eq!(m.unit, "");
    /// ```
    pub fn new<S>(name: S, value: f64) -> Metric
        where S: Into<String>
    {
        Metric {
            name: name.into(),
            value: value,
            time: 0,
            unit: String::new(),
        }
    }

    /// Set the sample time, taken to be UTC seconds since the Unix epoch.
    pub fn time(mut self, time: i64) -> Metric {
        self.time = time;
        self
    }

    /// Set the sample unit.
    pub fn unit<S>(mut self, unit: S) -> Metric
        where S: Into<String>
    {
        self.unit = unit.into();
        self
    }
}

/// The translation of one platform envelope into a set of labeled samples.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricEvent {
    /// The samples, in translation order. Order is significant for the
    /// fingerprint.
    pub metrics: Vec<Metric>,
    /// The normalized label set shared by every sample in `metrics`.
    pub labels: TagMap,
    /// The variant of the envelope this event was translated from.
    pub kind: EventType,
}

impl MetricEvent {
    /// A string fingerprint that can be used to dedupe MetricEvents.
    ///
    /// The fingerprint concatenates every sample name in sequence order, then
    /// every label key immediately followed by its value in sorted key order.
    /// There are no delimiters between fields; the result is an identity, not
    /// a parseable serialization. Two events with the same names and labels
    /// share a fingerprint even when their values and timestamps differ.
    pub fn fingerprint(&self) -> String {
        let mut buf = String::new();
        for metric in &self.metrics {
            buf.push_str(&metric.name);
        }
        // TagMap iteration is sorted by key, which is exactly the stable
        // order the fingerprint needs.
        for &(ref key, ref val) in self.labels.iter() {
            buf.push_str(key);
            buf.push_str(val);
        }
        buf
    }
}

#[cfg(test)]
mod tests {
    use envelope::EventType;
    use metric::{Metric, MetricEvent, TagMap};

    fn event(metrics: Vec<Metric>, labels: TagMap) -> MetricEvent {
        MetricEvent {
            metrics: metrics,
            labels: labels,
            kind: EventType::ValueMetric,
        }
    }

    #[test]
    fn fingerprint_ignores_label_insertion_order() {
        let mut fwd = TagMap::default();
        fwd.insert("deployment", "cf");
        fwd.insert("originPath", "/router/gorouter");

        let mut rev = TagMap::default();
        rev.insert("originPath", "/router/gorouter");
        rev.insert("deployment", "cf");

        let lhs = event(vec![Metric::new("latency", 0.1)], fwd);
        let rhs = event(vec![Metric::new("latency", 0.2)], rev);

        assert_eq!(lhs.fingerprint(), rhs.fingerprint());
    }

    #[test]
    fn fingerprint_preserves_metric_name_order() {
        let labels = TagMap::default();
        let lhs = event(vec![Metric::new("a", 0.0), Metric::new("b", 0.0)],
                        labels.clone());
        let rhs = event(vec![Metric::new("b", 0.0), Metric::new("a", 0.0)],
                        labels);

        assert!(lhs.fingerprint() != rhs.fingerprint());
    }

    #[test]
    fn fingerprint_ignores_values_and_times() {
        let mut labels = TagMap::default();
        labels.insert("index", "0");

        let lhs = event(vec![Metric::new("cpu", 1.0).time(10)], labels.clone());
        let rhs = event(vec![Metric::new("cpu", 99.0).time(999)], labels);

        assert_eq!(lhs.fingerprint(), rhs.fingerprint());
    }

    #[test]
    fn fingerprint_layout() {
        let mut labels = TagMap::default();
        labels.insert("b", "2");
        labels.insert("a", "1");

        let ev = event(vec![Metric::new("x", 0.0), Metric::new("y", 0.0)],
                       labels);
        assert_eq!("xya1b2", ev.fingerprint());
    }
}
