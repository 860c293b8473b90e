use bytes::Bytes;
use rangefetch::chunk::{ByteRange, CallbackId, ChunkSink, ChunkSummary};
use rangefetch::downloader::{ChunkDownloader, TaskControl, TaskState};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;
use tracing_subscriber::EnvFilter;
use wiremock::MockServer;

// Common test constants
pub const TEST_USER_AGENT: &str = "rangefetch-test-agent";
pub const TEST_FILE_PATH: &str = "/maps/file.mwm";

/// Installs a test subscriber honouring `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Starts a mock HTTP server.
pub async fn start_mock_server() -> MockServer {
    init_tracing();
    MockServer::start().await
}

/// Creates test file content of specified size
pub fn create_test_content(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 251) as u8).collect()
}

/// URL of the test file on the mock server
pub fn test_file_url(server: &MockServer) -> String {
    format!("{}{}", server.uri(), TEST_FILE_PATH)
}

/// Answers the first connection with `response` verbatim, then closes it.
///
/// Returns the URL of the test file on that listener. Used for responses a
/// well-behaved mock server will not produce, such as a truncated body.
pub fn serve_raw_once(response: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind listener");
    let addr = listener.local_addr().expect("Listener has no address");
    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let _ = stream.write_all(&response);
            let _ = stream.flush();
        }
    });
    format!("http://{}{}", addr, TEST_FILE_PATH)
}

// === Recording Sink ===

/// A callback received by a [`RecordingSink`].
#[derive(Debug, Clone)]
pub enum Event {
    Write {
        offset: u64,
        data: Bytes,
        accepted: bool,
    },
    Finish(ChunkSummary),
    Cancelled(CallbackId, ByteRange),
}

/// A sink recording every callback, optionally rejecting a segment or
/// cancelling the download from inside a write.
#[derive(Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<Event>>>,
    reject_at: Option<usize>,
    cancel_on_write: Option<TaskControl>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects the segment with the given index (0-based).
    pub fn rejecting_at(index: usize) -> Self {
        Self {
            reject_at: Some(index),
            ..Self::default()
        }
    }

    /// Cancels `control` when the first segment arrives, accepting it.
    pub fn cancelling(control: TaskControl) -> Self {
        Self {
            cancel_on_write: Some(control),
            ..Self::default()
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    /// Every write call, accepted or not: (offset, data, accepted).
    pub fn writes(&self) -> Vec<(u64, Bytes, bool)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Write {
                    offset,
                    data,
                    accepted,
                } => Some((offset, data, accepted)),
                _ => None,
            })
            .collect()
    }

    /// Accepted segments: (offset, data).
    pub fn accepted(&self) -> Vec<(u64, Bytes)> {
        self.writes()
            .into_iter()
            .filter(|(_, _, accepted)| *accepted)
            .map(|(offset, data, _)| (offset, data))
            .collect()
    }

    pub fn finishes(&self) -> Vec<ChunkSummary> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Finish(summary) => Some(summary),
                _ => None,
            })
            .collect()
    }

    pub fn cancellations(&self) -> usize {
        self.events()
            .iter()
            .filter(|event| matches!(event, Event::Cancelled(..)))
            .count()
    }

    /// The single finish summary; panics unless exactly one was delivered.
    pub fn single_finish(&self) -> ChunkSummary {
        let finishes = self.finishes();
        assert_eq!(finishes.len(), 1, "expected exactly one finish: {:?}", finishes);
        finishes.into_iter().next().unwrap()
    }
}

impl ChunkSink for RecordingSink {
    fn write(&mut self, _id: CallbackId, offset: u64, data: Bytes) -> bool {
        let mut events = self.events.lock().unwrap();
        let index = events
            .iter()
            .filter(|event| matches!(event, Event::Write { .. }))
            .count();
        let accepted = self.reject_at != Some(index);
        if let Some(control) = &self.cancel_on_write {
            control.cancel();
        }
        events.push(Event::Write {
            offset,
            data,
            accepted,
        });
        accepted
    }

    fn finish(&mut self, summary: &ChunkSummary) {
        self.events
            .lock()
            .unwrap()
            .push(Event::Finish(summary.clone()));
    }

    fn cancelled(&mut self, id: CallbackId, range: ByteRange) {
        self.events.lock().unwrap().push(Event::Cancelled(id, range));
    }
}

// === Running Helpers ===

/// Starts `downloader` with `sink` and waits for the worker to end.
pub async fn run_to_end(downloader: &ChunkDownloader, sink: RecordingSink) -> TaskState {
    downloader
        .start(sink)
        .expect("Failed to start download")
        .await
        .expect("Download worker panicked")
}

// === Assertion Helpers ===

/// Asserts segments are contiguous from `begin` and together equal `content`.
pub fn assert_contiguous(segments: &[(u64, Bytes)], begin: u64, content: &[u8]) {
    let mut expected_offset = begin;
    let mut joined = Vec::with_capacity(content.len());
    for (offset, data) in segments {
        assert_eq!(*offset, expected_offset, "Segment offsets must be contiguous");
        assert!(!data.is_empty(), "Segments must not be empty");
        expected_offset += data.len() as u64;
        joined.extend_from_slice(data);
    }
    assert_eq!(joined.len(), content.len(), "Downloaded size mismatch");
    assert!(joined == content, "Downloaded content mismatch");
}
