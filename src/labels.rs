//! Label construction. The monitoring backend accepts only 10 custom labels
//! per metric, so instead of one label per identity dimension the nozzle
//! collapses most metadata into two slash-delimited paths, one naming the
//! metric's origin and one naming the serving application. Deployment and the
//! vm / application instance indexes stay separate labels so that operators
//! can still aggregate across instances.

use appinfo::AppInfoResolver;
use envelope::{self, Envelope};
use metric::TagMap;

/// A small value wrapper around `TagMap` with the three behaviors label
/// assembly needs: conditional set, fallback set and path encoding.
#[derive(Debug, Default)]
pub struct LabelMap {
    inner: TagMap,
}

impl LabelMap {
    /// Set `key` to `value`, unless `value` is empty.
    pub fn set_if_not_empty(&mut self, key: &str, value: &str) {
        if !value.is_empty() {
            self.inner.insert(String::from(key), String::from(value));
        }
    }

    /// Set `key` to `value`, or to `unknown_<key>` when `value` is empty.
    pub fn set_value_or_unknown(&mut self, key: &str, value: &str) {
        if value.is_empty() {
            self.inner.insert(String::from(key), format!("unknown_{}", key));
        } else {
            self.inner.insert(String::from(key), String::from(value));
        }
    }

    /// Join the values of `keys`, in the order given, into a slash-delimited
    /// path. Keys absent from the map are skipped entirely rather than
    /// rendered as empty segments, so two different missing-field situations
    /// may collapse to the same path. Empty when no key is present.
    pub fn path(&self, keys: &[&str]) -> String {
        let mut buf = String::new();
        for &key in keys {
            if let Some(value) = self.inner.get(key) {
                buf.push('/');
                buf.push_str(value);
            }
        }
        buf
    }

    /// Unwrap into the underlying tagmap.
    pub fn into_tags(self) -> TagMap {
        self.inner
    }
}

/// Builds the label set for an envelope.
pub struct LabelMaker<R> {
    resolver: R,
}

impl<R> LabelMaker<R>
    where R: AppInfoResolver
{
    /// Create a label maker over the given application-metadata resolver.
    pub fn new(resolver: R) -> LabelMaker<R> {
        LabelMaker { resolver: resolver }
    }

    /// Build the label set for an envelope.
    ///
    /// The result carries at most five structured keys -- `deployment`,
    /// `originPath`, `index`, `applicationPath`, `instanceIndex` -- plus a
    /// copy of every envelope tag. Tags overwrite structured keys on
    /// collision; upstream gets the last word. Nothing here enforces the
    /// backend's 10-key bound, callers owning unbounded tag sources must cap
    /// them before emission.
    pub fn build(&self, envelope: &Envelope) -> TagMap {
        let mut labels = LabelMap::default();
        labels.set_if_not_empty("deployment", &envelope.deployment);
        labels.set_if_not_empty("originPath", &self.origin_path(envelope));
        labels.set_if_not_empty("index", &envelope.index);
        labels.set_if_not_empty("applicationPath", &self.application_path(envelope));
        labels.set_if_not_empty("instanceIndex", &envelope::instance_index(envelope));

        let mut tags = labels.into_tags();
        tags.overlay(&envelope.tags);
        tags
    }

    /// The path that identifies a metric origin, `/job/origin`, e.g.
    /// `/diego_brain/tps_listener`. Both segments fall back to an `unknown_`
    /// value, so every envelope gets an origin path.
    fn origin_path(&self, envelope: &Envelope) -> String {
        let mut labels = LabelMap::default();
        labels.set_value_or_unknown("job", &envelope.job);
        labels.set_value_or_unknown("origin", &envelope.origin);
        labels.path(&["job", "origin"])
    }

    /// The path that identifies the instances of an application within an
    /// org and space, `/org/space/application`, e.g.
    /// `/system/autoscaling/autoscale`. Empty when the envelope names no
    /// application or the resolver does not recognize it.
    fn application_path(&self, envelope: &Envelope) -> String {
        let guid = envelope::application_id(envelope);
        if guid.is_empty() {
            return String::new();
        }
        let app = self.resolver.lookup(&guid);
        if app.app_name.is_empty() {
            return String::new();
        }

        let mut labels = LabelMap::default();
        labels.set_value_or_unknown("org", &app.org_name);
        labels.set_value_or_unknown("space", &app.space_name);
        labels.set_value_or_unknown("application", &app.app_name);
        labels.path(&["org", "space", "application"])
    }
}
