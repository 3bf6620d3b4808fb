use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::sample_chunk::SampleChunk;

#[derive(Debug, Default)]
struct CollectorState {
    chunks: Vec<SampleChunk>,
    sample_count: usize,
    closed: bool,
}

/// Ordered, thread-safe staging area for captured chunks.
///
/// Clones share the same storage, so one handle can live in a capture
/// callback while the job keeps another. Chunks are kept in push order.
/// Once closed, further pushes are dropped.
#[derive(Debug, Clone, Default)]
pub struct ChunkCollector {
    inner: Arc<Mutex<CollectorState>>,
}

impl ChunkCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk. Returns `false` if the collector is closed.
    pub fn push(&self, chunk: impl Into<SampleChunk>) -> bool {
        let chunk = chunk.into();
        let mut state = self.inner.lock();
        if state.closed {
            log::debug!("Dropping {}-sample chunk pushed after close", chunk.len());
            return false;
        }
        state.sample_count += chunk.len();
        state.chunks.push(chunk);
        true
    }

    pub fn chunk_count(&self) -> usize {
        self.inner.lock().chunks.len()
    }

    /// Total samples pushed so far. Kept after [`take`](Self::take), reset by [`discard`](Self::discard).
    pub fn sample_count(&self) -> usize {
        self.inner.lock().sample_count
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }

    /// Stop accepting chunks.
    pub fn close(&self) {
        self.inner.lock().closed = true;
    }

    /// Close and hand over every collected chunk in arrival order.
    pub fn take(&self) -> Vec<SampleChunk> {
        let mut state = self.inner.lock();
        state.closed = true;
        std::mem::take(&mut state.chunks)
    }

    /// Close and drop every collected chunk. Returns how many were dropped.
    pub fn discard(&self) -> usize {
        let mut state = self.inner.lock();
        state.closed = true;
        state.sample_count = 0;
        let dropped = state.chunks.len();
        state.chunks.clear();
        dropped
    }
}
