//! Common test utilities and fixture helpers.
//!
//! This module provides shared test infrastructure for integration tests:
//! fixture paths, in-memory navaid sources and a minimal HTTP stub server for
//! exercising the real OpenAIP client.

use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use flightroute_lib::openaip::parse_navaids;
use flightroute_lib::{AirportCatalog, BoundingBox, Error, Navaid, NavaidSource, Result};

/// Path to fixtures directory used by tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Path to the fixture airport dataset.
#[allow(dead_code)]
pub fn fixture_airports_path() -> PathBuf {
    fixtures_dir().join("airports.json")
}

#[allow(dead_code)]
pub fn fixture_catalog() -> AirportCatalog {
    AirportCatalog::from_path(&fixture_airports_path()).expect("fixture airports load")
}

/// Raw OpenAIP navaid search response used by tests.
#[allow(dead_code)]
pub fn fixture_navaid_body() -> String {
    fs::read_to_string(fixtures_dir().join("navaids_response.json")).expect("read navaid fixture")
}

/// Navaid source serving a fixed list and counting calls.
#[allow(dead_code)]
#[derive(Debug, Clone, Default)]
pub struct FixtureSource {
    navaids: Vec<Navaid>,
    calls: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl FixtureSource {
    pub fn new(navaids: Vec<Navaid>) -> Self {
        Self {
            navaids,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Source backed by `docs/fixtures/navaids_response.json`.
    pub fn from_fixture() -> Self {
        Self::new(parse_navaids(&fixture_navaid_body()).expect("fixture parses"))
    }

    /// Shared call counter, readable after the source is moved into a client.
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl NavaidSource for FixtureSource {
    fn fetch_navaids(&self, _bbox: &BoundingBox) -> Result<Vec<Navaid>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.navaids.clone())
    }
}

/// Navaid source that always fails.
#[allow(dead_code)]
#[derive(Debug, Clone, Default)]
pub struct FailingSource {
    calls: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl FailingSource {
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl NavaidSource for FailingSource {
    fn fetch_navaids(&self, _bbox: &BoundingBox) -> Result<Vec<Navaid>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "simulated network failure",
        )))
    }
}

/// Single-threaded HTTP server answering every request with the same canned
/// response. Received request heads are returned by [`StubServer::next_request`].
#[allow(dead_code)]
pub struct StubServer {
    pub base_url: String,
    requests: Receiver<String>,
}

#[allow(dead_code)]
impl StubServer {
    pub fn start(status: &'static str, body: impl Into<String>) -> Self {
        let body = body.into();
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
        let addr = listener.local_addr().expect("stub server address");
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else {
                    break;
                };
                let head = read_request_head(&mut stream);
                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
                if tx.send(head).is_err() {
                    break;
                }
            }
        });

        Self {
            base_url: format!("http://{addr}/api/v1"),
            requests: rx,
        }
    }

    /// Next request head received by the server.
    pub fn next_request(&self) -> Option<String> {
        self.requests.recv_timeout(Duration::from_secs(5)).ok()
    }

    pub fn request_count(&self) -> usize {
        self.requests.try_iter().count()
    }
}

#[allow(dead_code)]
fn read_request_head(stream: &mut impl Read) -> String {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }
    String::from_utf8_lossy(&head).into_owned()
}

/// Base URL nothing is listening on.
#[allow(dead_code)]
pub fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{addr}/api/v1")
}
