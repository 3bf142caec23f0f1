//! Nozzle normalizes a stream of heterogeneous platform events -- HTTP
//! transaction records, log lines, container resource samples -- into metric
//! events carrying a bounded set of labels plus a stable fingerprint that
//! downstream consumers can use to dedupe time series. The monitoring backend
//! this feeds accepts only a small number of custom labels per metric, so raw
//! identity dimensions are collapsed into slash-delimited "path" labels.
//!
//! The crate is a pure, synchronous transformation layer: one envelope in,
//! at most one labeled metric event out. It does not buffer, retry, batch or
//! rate-limit. Stream connection management, application-metadata caching and
//! backend transport all live with the caller, behind the small traits in
//! `appinfo` and `forward`.
#![allow(unknown_lints)]
#![deny(trivial_numeric_casts, missing_docs, unstable_features, unused_import_braces)]
extern crate byteorder;
extern crate chrono;
extern crate serde;
extern crate uuid;

#[macro_use]
extern crate log;

#[macro_use]
extern crate serde_derive;

#[cfg(test)]
extern crate quickcheck;

pub mod appinfo;
pub mod envelope;
pub mod forward;
pub mod labels;
pub mod metric;
pub mod time;
pub mod translate;
