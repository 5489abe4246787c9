//! Item Stream
//!
//!     A bounded, ordered hand-off between a producer task that drives a [`Scanner`] and a
//!     consumer that drains items. The producer can run ahead by at most `capacity` items; after
//!     that each send waits until the consumer catches up.
//!
//! Lifecycle
//!
//!     The producer feeds every chunk, finishes the scanner, and drops its sender. Dropping the
//!     sender is what closes the stream, so closure happens exactly once and only after the final
//!     pending block has been sent. Consumers loop on [`ItemStream::next`] until it returns `None`.
//!
//! Cancellation
//!
//!     [`ItemStream::cancel`] closes the receiving half. The producer scans one line at a time
//!     and checks for closure before every line, so it notices either on its next send or before
//!     its next line, stops scanning and exits. [`ItemStream::join`] waits for the producer and
//!     reports how far it got.
//!
//!     An encoding error ends the stream the same way, after every item finalized ahead of the
//!     bad line has been sent; `join` then returns the error.
use super::error::ScanError;
use super::item::Item;
use super::scanner::Scanner;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Buffer size used when the caller does not pick one.
pub const DEFAULT_CAPACITY: usize = 100;

/// What the producer did before it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanReport {
    /// Items handed to the channel
    pub items: usize,
    /// Lines consumed by the scanner
    pub lines: usize,
    /// True if the consumer went away before the input was exhausted
    pub cancelled: bool,
}

pub struct ItemStream {
    receiver: mpsc::Receiver<Item>,
    producer: JoinHandle<Result<ScanReport, ScanError>>,
}

impl ItemStream {
    /// Spawn a producer on the current tokio runtime that scans `chunks` in order.
    ///
    /// A `capacity` of zero is treated as one.
    pub fn spawn<I>(chunks: I, capacity: usize) -> Self
    where
        I: IntoIterator + Send + 'static,
        I::IntoIter: Send,
        I::Item: AsRef<[u8]> + Send,
    {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let producer = tokio::spawn(produce(chunks, sender));
        Self { receiver, producer }
    }

    /// Next item, or `None` once the producer has closed the stream.
    pub async fn next(&mut self) -> Option<Item> {
        self.receiver.recv().await
    }

    /// Blocking variant of [`next`](Self::next) for synchronous consumers.
    ///
    /// Must not be called from within an async context.
    pub fn blocking_next(&mut self) -> Option<Item> {
        self.receiver.blocking_recv()
    }

    /// Signal the producer to stop. Items already buffered can still be drained.
    pub fn cancel(&mut self) {
        self.receiver.close();
    }

    /// Close the stream and wait for the producer to exit.
    pub async fn join(mut self) -> Result<ScanReport, ScanError> {
        self.receiver.close();
        match self.producer.await {
            Ok(result) => result,
            Err(err) => Err(ScanError::ProducerFailed(err.to_string())),
        }
    }

    /// Drain every remaining item, then wait for the producer.
    pub async fn collect(mut self) -> Result<Vec<Item>, ScanError> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await {
            items.push(item);
        }
        self.join().await?;
        Ok(items)
    }
}

async fn produce<I>(chunks: I, sender: mpsc::Sender<Item>) -> Result<ScanReport, ScanError>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut scanner = Scanner::new();
    let mut report = ScanReport::default();

    for chunk in chunks {
        scanner.push(chunk.as_ref())?;
        if !pump(&mut scanner, &sender, &mut report).await? {
            return Ok(cancelled(report, &scanner));
        }
    }

    scanner.end_input();
    if !pump(&mut scanner, &sender, &mut report).await? {
        return Ok(cancelled(report, &scanner));
    }
    report.lines = scanner.lines_read();
    log::debug!(
        "producer done: {} items from {} lines",
        report.items,
        report.lines
    );
    Ok(report)
}

/// Scan buffered lines one at a time, sending each item as soon as it is finalized.
///
/// Returns false once the receiver has gone away.
async fn pump(
    scanner: &mut Scanner,
    sender: &mpsc::Sender<Item>,
    report: &mut ScanReport,
) -> Result<bool, ScanError> {
    loop {
        if sender.is_closed() {
            return Ok(false);
        }
        let emitted = match scanner.step()? {
            Some(emitted) => emitted,
            None => return Ok(true),
        };
        for item in emitted {
            if sender.send(item).await.is_err() {
                return Ok(false);
            }
            report.items += 1;
        }
    }
}

fn cancelled(mut report: ScanReport, scanner: &Scanner) -> ScanReport {
    report.lines = scanner.lines_read();
    report.cancelled = true;
    log::info!(
        "item stream cancelled by consumer after {} items ({} lines read)",
        report.items,
        report.lines
    );
    report
}
