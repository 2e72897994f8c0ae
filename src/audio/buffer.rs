use parking_lot::Mutex;
use ringbuf::{traits::*, HeapRb};
use std::sync::Arc;

/// Thread-safe ring buffer for audio samples.
///
/// The recorder uses one as the staging area between the capture stream
/// and chunk cutting: writes never block, and once the buffer is full the
/// oldest samples are dropped first.
pub struct AudioRingBuffer {
    buffer: Arc<Mutex<HeapRb<f32>>>,
}

impl AudioRingBuffer {
    /// Create a new ring buffer with the specified capacity in samples.
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: Arc::new(Mutex::new(HeapRb::new(capacity))),
        }
    }

    /// Write samples, dropping the oldest on overflow.
    /// Returns the number of samples written.
    pub fn write(&self, samples: &[f32]) -> usize {
        let mut buffer = self.buffer.lock();
        let mut written = 0;

        for &sample in samples {
            if buffer.try_push(sample).is_err() {
                let _ = buffer.try_pop();
                let _ = buffer.try_push(sample);
            }
            written += 1;
        }

        written
    }

    /// Read up to `count` samples from the buffer.
    pub fn read(&self, count: usize) -> Vec<f32> {
        let mut buffer = self.buffer.lock();
        let mut samples = Vec::with_capacity(count);

        for _ in 0..count {
            match buffer.try_pop() {
                Some(sample) => samples.push(sample),
                None => break,
            }
        }

        samples
    }

    /// Drain everything currently buffered. Used when a recording stops
    /// and the tail (shorter than one chunk) still has to be uploaded.
    pub fn drain(&self) -> Vec<f32> {
        let len = self.len();
        self.read(len)
    }

    /// Number of samples available to read.
    pub fn len(&self) -> usize {
        self.buffer.lock().occupied_len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }

    pub fn capacity(&self) -> usize {
        self.buffer.lock().capacity().get()
    }
}

impl Clone for AudioRingBuffer {
    fn clone(&self) -> Self {
        Self {
            buffer: Arc::clone(&self.buffer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_read() {
        let buffer = AudioRingBuffer::new(1024);
        let data: Vec<f32> = (0..100).map(|i| i as f32).collect();

        let written = buffer.write(&data);
        assert_eq!(written, 100);

        let read_data = buffer.read(100);
        assert_eq!(read_data, data);
    }

    #[test]
    fn test_overflow_drops_oldest() {
        let buffer = AudioRingBuffer::new(10);
        let data: Vec<f32> = (0..20).map(|i| i as f32).collect();

        buffer.write(&data);

        let read_data = buffer.read(20);
        assert_eq!(read_data.len(), 10);
        // Oldest samples were dropped, newest survive
        assert_eq!(read_data[0], 10.0);
        assert_eq!(read_data[9], 19.0);
    }

    #[test]
    fn test_drain_empties_buffer() {
        let buffer = AudioRingBuffer::new(64);
        buffer.write(&[0.1, 0.2, 0.3]);

        let drained = buffer.drain();
        assert_eq!(drained.len(), 3);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_partial_read() {
        let buffer = AudioRingBuffer::new(64);
        buffer.write(&[1.0, 2.0, 3.0, 4.0]);

        let first = buffer.read(2);
        assert_eq!(first, vec![1.0, 2.0]);
        assert_eq!(buffer.len(), 2);
    }
}
