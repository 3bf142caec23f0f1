//! tagmap is the key, value collection that rides along with each `Envelope`
//! and each labeled `MetricEvent`. Think of it as a specialized hashmap: the
//! collections here are small -- a handful of structured labels plus whatever
//! free-form tags the platform attached -- and the fingerprint in
//! `metric::event` needs the keys back in a stable sorted order. A sorted
//! vector gives us both cheaply.

use std::slice::Iter;

/// A key, value collection with unique string keys, stored sorted by key.
///
/// Insertion keeps the backing vector ordered, so `iter` always yields pairs
/// in byte-wise lexicographic key order. Serialization for hashing relies on
/// this invariant.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TagMap {
    inner: Vec<(String, String)>,
}

impl TagMap {
    /// Get a value from the tagmap, if it exists.
    pub fn get(&self, key: &str) -> Option<&str> {
        match self.inner
            .binary_search_by(|probe| probe.0.as_str().cmp(key)) {
            Ok(idx) => Some(&self.inner[idx].1),
            Err(_) => None,
        }
    }

    /// Insert a key / value into self
    ///
    /// This method will return the value previously stored under the given
    /// key, if there was such a value.
    pub fn insert<S>(&mut self, key: S, val: S) -> Option<String>
        where S: Into<String>
    {
        let key = key.into();
        let val = val.into();
        match self.inner.binary_search_by(|probe| probe.0.cmp(&key)) {
            Ok(idx) => {
                self.inner.push((key, val));
                let old = self.inner.swap_remove(idx);
                Some(old.1)
            }
            Err(idx) => {
                self.inner.insert(idx, (key, val));
                None
            }
        }
    }

    /// Overlay another tagmap onto self
    ///
    /// Every key / value pair from `other` is inserted into self. Keys
    /// already present in self are overwritten with the value from `other`.
    pub fn overlay(&mut self, other: &TagMap) {
        for &(ref key, ref val) in other.iter() {
            self.insert(key.clone(), val.clone());
        }
    }

    /// Iterate pairs in sorted key order.
    pub fn iter(&self) -> Iter<(String, String)> {
        self.inner.iter()
    }

    /// Determine if the tagmap is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Total number of key / value pairs stored in the map.
    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<'a> IntoIterator for &'a TagMap {
    type Item = &'a (String, String);
    type IntoIter = Iter<'a, (String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::TagMap;

    #[test]
    fn insert_reports_previous_value() {
        let mut map = TagMap::default();
        assert_eq!(None, map.insert("deployment", "cf"));
        assert_eq!(Some(String::from("cf")), map.insert("deployment", "pcf"));
        assert_eq!(Some("pcf"), map.get("deployment"));
        assert_eq!(1, map.len());
    }

    #[test]
    fn iteration_is_key_sorted() {
        let mut map = TagMap::default();
        map.insert("zebra", "0");
        map.insert("apple", "1");
        map.insert("mango", "2");

        let keys: Vec<&str> = map.iter().map(|&(ref k, _)| k.as_str()).collect();
        assert_eq!(vec!["apple", "mango", "zebra"], keys);
    }

    #[test]
    fn overlay_prefers_other() {
        let mut base = TagMap::default();
        base.insert("index", "0");
        base.insert("job", "router");

        let mut other = TagMap::default();
        other.insert("index", "7");

        base.overlay(&other);
        assert_eq!(Some("7"), base.get("index"));
        assert_eq!(Some("router"), base.get("job"));
    }
}
