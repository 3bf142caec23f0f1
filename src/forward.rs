//! The seam between the stream client and the rest of the pipeline. The
//! client hands envelopes to a `Handler` one at a time, synchronously, and
//! does no buffering on the handler's behalf -- handlers are expected to
//! return quickly. `Forwarder` is the handler this crate provides: it labels,
//! translates and passes metric events on to a `Sink`.

use appinfo::AppInfoResolver;
use envelope::Envelope;
use labels::LabelMaker;
use metric::MetricEvent;
use translate;

/// The delivery callback the stream client invokes per envelope.
pub trait Handler {
    /// Accept one envelope. The envelope is borrowed for the duration of the
    /// call only.
    fn handle_event(&mut self, envelope: &Envelope);
}

/// A destination for labeled metric events, typically the transport toward
/// the monitoring backend. Batching, retries and rate limiting are the
/// sink's own business.
pub trait Sink {
    /// Accept one translated metric event.
    fn deliver(&mut self, event: MetricEvent);
}

/// A `Handler` that translates metric-bearing envelopes and forwards the
/// results to a sink, dropping everything else.
pub struct Forwarder<R, S> {
    maker: LabelMaker<R>,
    sink: S,
}

impl<R, S> Forwarder<R, S>
    where R: AppInfoResolver,
          S: Sink
{
    /// Create a forwarder from a label maker and a sink.
    pub fn new(maker: LabelMaker<R>, sink: S) -> Forwarder<R, S> {
        Forwarder {
            maker: maker,
            sink: sink,
        }
    }
}

impl<R, S> Handler for Forwarder<R, S>
    where R: AppInfoResolver,
          S: Sink
{
    fn handle_event(&mut self, envelope: &Envelope) {
        if let Some(event) = translate::metric_event(&self.maker, envelope) {
            self.sink.deliver(event);
        }
    }
}
