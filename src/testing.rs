//! In-memory stand-ins for serial hardware and the backend.

use std::collections::HashMap;
use std::io::{self, Cursor, Read, Write};
use std::sync::{Arc, Mutex};

use crate::bridge::{CallId, Invoke, Request};
use crate::error::{Error, Result};
use crate::serial::{PortProvider, SerialLink};

/// A link that replays scripted camera bytes and records what was written.
#[derive(Debug)]
pub struct FakeLink {
    input: Cursor<Vec<u8>>,
    output: Arc<Mutex<Vec<u8>>>,
}

impl FakeLink {
    pub fn replying(bytes: &[u8]) -> Self {
        Self {
            input: Cursor::new(bytes.to_vec()),
            output: Arc::default(),
        }
    }

    pub fn written(&self) -> Arc<Mutex<Vec<u8>>> {
        Arc::clone(&self.output)
    }
}

impl Read for FakeLink {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.input.read(buf)
    }
}

impl Write for FakeLink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Ports backed by scripted cameras. Opening an unknown path fails.
#[derive(Debug, Default)]
pub struct FakePorts {
    ports: Vec<String>,
    cameras: HashMap<String, Vec<u8>>,
    listing_fails: bool,
}

impl FakePorts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_camera(mut self, path: &str, replies: &[u8]) -> Self {
        self.ports.push(path.to_string());
        self.cameras.insert(path.to_string(), replies.to_vec());
        self
    }

    pub fn with_port(mut self, path: &str) -> Self {
        self.ports.push(path.to_string());
        self
    }

    pub fn failing_listing(mut self) -> Self {
        self.listing_fails = true;
        self
    }
}

impl PortProvider for FakePorts {
    fn available_ports(&self) -> Result<Vec<String>> {
        if self.listing_fails {
            return Err(Error::Io(io::Error::other("enumeration failed")));
        }
        Ok(self.ports.clone())
    }

    fn open(&self, path: &str) -> Result<Box<dyn SerialLink>> {
        match self.cameras.get(path) {
            Some(replies) => Ok(Box::new(FakeLink::replying(replies))),
            None => Err(Error::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{path} not found"),
            ))),
        }
    }
}

/// Records requests instead of sending them anywhere.
#[derive(Debug, Default)]
pub struct RecordingInvoker {
    pub requests: Vec<(CallId, Request)>,
    next_id: CallId,
}

impl RecordingInvoker {
    pub fn sent(&self) -> Vec<Request> {
        self.requests.iter().map(|(_, request)| request.clone()).collect()
    }
}

impl Invoke for RecordingInvoker {
    fn invoke(&mut self, request: Request) -> CallId {
        self.next_id += 1;
        self.requests.push((self.next_id, request));
        self.next_id
    }
}
