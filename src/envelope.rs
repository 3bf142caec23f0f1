//! The envelope is the unit of delivery from the platform's event stream: a
//! common header -- origin, job, deployment, index, free-form tags -- wrapped
//! around one of a closed set of event variants. This module owns the variant
//! dispatch: the two identifiers that cross-cut the variants, the application
//! guid and the instance index, live in a different field per variant and in
//! one case in a packed binary form.

use byteorder::{ByteOrder, LittleEndian};
use metric::TagMap;
use uuid::Uuid;

/// One observation delivered by the platform, with its routing header.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// The subsystem that emitted the event, e.g. `gorouter`.
    pub origin: String,
    /// The bosh deployment the emitting job belongs to. May be empty.
    pub deployment: String,
    /// The job name of the emitting VM. May be empty.
    pub job: String,
    /// The VM index within the job. May be empty.
    pub index: String,
    /// The platform timestamp of the observation, when one was attached.
    pub timestamp: Option<i64>,
    /// Free-form tags attached upstream. These take precedence over any
    /// label the nozzle computes.
    pub tags: TagMap,
    /// The event payload.
    pub event: EventKind,
}

impl Envelope {
    /// Create an envelope around an event payload. Header fields default to
    /// empty and may be layered on builder-style.
    pub fn new<S>(origin: S, event: EventKind) -> Envelope
        where S: Into<String>
    {
        Envelope {
            origin: origin.into(),
            deployment: String::new(),
            job: String::new(),
            index: String::new(),
            timestamp: None,
            tags: TagMap::default(),
            event: event,
        }
    }

    /// Set the deployment name.
    pub fn deployment<S>(mut self, deployment: S) -> Envelope
        where S: Into<String>
    {
        self.deployment = deployment.into();
        self
    }

    /// Set the job name.
    pub fn job<S>(mut self, job: S) -> Envelope
        where S: Into<String>
    {
        self.job = job.into();
        self
    }

    /// Set the VM index.
    pub fn index<S>(mut self, index: S) -> Envelope
        where S: Into<String>
    {
        self.index = index.into();
        self
    }

    /// Set the platform timestamp.
    pub fn timestamp(mut self, timestamp: i64) -> Envelope {
        self.timestamp = Some(timestamp);
        self
    }

    /// Overlay a tag onto the envelope. If the key was already present the
    /// old value is replaced.
    pub fn overlay_tag<S>(mut self, key: S, val: S) -> Envelope
        where S: Into<String>
    {
        self.tags.insert(key.into(), val.into());
        self
    }
}

/// The closed set of event variants the platform emits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// A completed HTTP transaction observed at the router.
    HttpStartStop {
        /// The serving application's 128-bit guid, as two little-endian
        /// 64-bit halves, when the request hit an application at all.
        application_id: Option<(u64, u64)>,
        /// The numeric index of the serving application instance.
        instance_index: Option<i32>,
        /// The string id of the serving instance. Sometimes present when
        /// `instance_index` is not.
        instance_id: Option<String>,
    },
    /// A line of application or component log output.
    LogMessage {
        /// The emitting application's guid, empty for component logs.
        app_id: String,
        /// The instance the line came from.
        source_instance: String,
    },
    /// A resource-usage sample for one application instance.
    ContainerMetric {
        /// The sampled application's guid.
        application_id: String,
        /// The sampled instance's index.
        instance_index: i32,
        /// CPU load, as a percentage of one core.
        cpu_percentage: f64,
        /// Resident memory, in bytes.
        memory_bytes: u64,
        /// Disk in use, in bytes.
        disk_bytes: u64,
    },
    /// A point-in-time reading of a named component metric.
    ValueMetric {
        /// The metric name, unique within the emitting origin.
        name: String,
        /// The reading.
        value: f64,
        /// The reading's unit, as reported. May be empty.
        unit: String,
    },
    /// A monotonic counter report from a component.
    CounterEvent {
        /// The counter name, unique within the emitting origin.
        name: String,
        /// The running total at report time.
        total: u64,
    },
    /// An error report from the platform itself.
    Error {
        /// The reporting source.
        source: String,
        /// The source-specific error code.
        code: i32,
        /// Human-readable detail.
        message: String,
    },
}

impl EventKind {
    /// The variant's discriminant, for carrying on a `MetricEvent`.
    pub fn event_type(&self) -> EventType {
        match *self {
            EventKind::HttpStartStop { .. } => EventType::HttpStartStop,
            EventKind::LogMessage { .. } => EventType::LogMessage,
            EventKind::ContainerMetric { .. } => EventType::ContainerMetric,
            EventKind::ValueMetric { .. } => EventType::ValueMetric,
            EventKind::CounterEvent { .. } => EventType::CounterEvent,
            EventKind::Error { .. } => EventType::Error,
        }
    }
}

/// The bare discriminant of an `EventKind`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    /// See `EventKind::HttpStartStop`.
    HttpStartStop,
    /// See `EventKind::LogMessage`.
    LogMessage,
    /// See `EventKind::ContainerMetric`.
    ContainerMetric,
    /// See `EventKind::ValueMetric`.
    ValueMetric,
    /// See `EventKind::CounterEvent`.
    CounterEvent,
    /// See `EventKind::Error`.
    Error,
}

/// Extract the application guid from the event contained in the envelope, for
/// those variants that carry one. Variants without an application -- and
/// HTTP transactions that never reached one -- yield the empty string.
pub fn application_id(envelope: &Envelope) -> String {
    match envelope.event {
        EventKind::HttpStartStop { ref application_id, .. } => {
            // An absent id stays absent. Formatting zero halves would
            // produce the all-zero guid, a valid-looking value.
            match *application_id {
                Some((low, high)) => format_uuid(low, high),
                None => String::new(),
            }
        }
        EventKind::LogMessage { ref app_id, .. } => app_id.clone(),
        EventKind::ContainerMetric { ref application_id, .. } => application_id.clone(),
        EventKind::ValueMetric { .. } |
        EventKind::CounterEvent { .. } |
        EventKind::Error { .. } => String::new(),
    }
}

/// Extract the instance index or instance id from the event contained in the
/// envelope, for those variants that carry one. Absence yields the empty
/// string, never an error.
pub fn instance_index(envelope: &Envelope) -> String {
    match envelope.event {
        EventKind::HttpStartStop { ref instance_index, ref instance_id, .. } => {
            match *instance_index {
                Some(idx) => format!("{}", idx),
                // Sometimes the index is not set but the instance id is.
                None => instance_id.clone().unwrap_or_default(),
            }
        }
        EventKind::LogMessage { ref source_instance, .. } => source_instance.clone(),
        EventKind::ContainerMetric { instance_index, .. } => format!("{}", instance_index),
        EventKind::ValueMetric { .. } |
        EventKind::CounterEvent { .. } |
        EventKind::Error { .. } => String::new(),
    }
}

/// Format a 128-bit guid delivered as two 64-bit halves into the canonical
/// dashed-hex form. The halves are the little-endian bytes of the guid, low
/// half first.
pub fn format_uuid(low: u64, high: u64) -> String {
    let mut bytes = [0u8; 16];
    LittleEndian::write_u64(&mut bytes[0..8], low);
    LittleEndian::write_u64(&mut bytes[8..16], high);
    Uuid::from_bytes(bytes).hyphenated().to_string()
}

#[cfg(test)]
mod tests {
    use envelope::{self, Envelope, EventKind};
    use quickcheck::QuickCheck;

    fn http(application_id: Option<(u64, u64)>,
            instance_index: Option<i32>,
            instance_id: Option<String>)
            -> Envelope {
        Envelope::new("gorouter",
                      EventKind::HttpStartStop {
                          application_id: application_id,
                          instance_index: instance_index,
                          instance_id: instance_id,
                      })
    }

    #[test]
    fn format_uuid_is_canonical() {
        fn inner(low: u64, high: u64) -> bool {
            let s = envelope::format_uuid(low, high);
            s.len() == 36 &&
            [8, 13, 18, 23].iter().all(|&i| s.as_bytes()[i] == b'-') &&
            s.chars().all(|c| c == '-' || (c.is_ascii_hexdigit() && !c.is_uppercase()))
        }
        QuickCheck::new()
            .tests(10000)
            .max_tests(100000)
            .quickcheck(inner as fn(u64, u64) -> bool);
    }

    #[test]
    fn format_uuid_zero_halves() {
        assert_eq!("00000000-0000-0000-0000-000000000000",
                   envelope::format_uuid(0, 0));
    }

    #[test]
    fn format_uuid_little_endian_layout() {
        assert_eq!("01000000-0000-0000-0000-000000000000",
                   envelope::format_uuid(1, 0));
        assert_eq!("00000000-0000-0000-0100-000000000000",
                   envelope::format_uuid(0, 1));
        assert_eq!("efcdab89-6745-2301-1032-547698badcfe",
                   envelope::format_uuid(0x0123_4567_89ab_cdef, 0xfedc_ba98_7654_3210));
    }

    #[test]
    fn application_id_per_variant() {
        assert_eq!("01000000-0000-0000-0000-000000000000",
                   envelope::application_id(&http(Some((1, 0)), None, None)));
        assert_eq!("", envelope::application_id(&http(None, None, None)));

        let log = Envelope::new("rep",
                                EventKind::LogMessage {
                                    app_id: String::from("app-guid"),
                                    source_instance: String::from("3"),
                                });
        assert_eq!("app-guid", envelope::application_id(&log));

        let counter = Envelope::new("rep",
                                    EventKind::CounterEvent {
                                        name: String::from("requests"),
                                        total: 10,
                                    });
        assert_eq!("", envelope::application_id(&counter));
    }

    #[test]
    fn instance_index_prefers_numeric_index() {
        let both = http(None, Some(4), Some(String::from("cell-9")));
        assert_eq!("4", envelope::instance_index(&both));

        let id_only = http(None, None, Some(String::from("cell-9")));
        assert_eq!("cell-9", envelope::instance_index(&id_only));

        let neither = http(None, None, None);
        assert_eq!("", envelope::instance_index(&neither));
    }

    #[test]
    fn instance_index_per_variant() {
        let log = Envelope::new("rep",
                                EventKind::LogMessage {
                                    app_id: String::new(),
                                    source_instance: String::from("12"),
                                });
        assert_eq!("12", envelope::instance_index(&log));

        let container = Envelope::new("rep",
                                      EventKind::ContainerMetric {
                                          application_id: String::from("app-guid"),
                                          instance_index: 2,
                                          cpu_percentage: 0.5,
                                          memory_bytes: 1024,
                                          disk_bytes: 2048,
                                      });
        assert_eq!("2", envelope::instance_index(&container));

        let error = Envelope::new("doppler",
                                  EventKind::Error {
                                      source: String::from("doppler"),
                                      code: 1,
                                      message: String::from("dropped"),
                                  });
        assert_eq!("", envelope::instance_index(&error));
    }
}
