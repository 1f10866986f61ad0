//! Shared test doubles: scripted fetcher, recording notifier and a one-shot
//! loopback HTTP server.

#![allow(dead_code)]

use async_trait::async_trait;
use sheet_notifier::error::{NotifierError, Result};
use sheet_notifier::notify::Notifier;
use sheet_notifier::sheet::{Sheet, SheetFetcher, parse_tsv};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// Build a two-column TSV body whose last row's second cell is `value`.
pub fn body_with_last(value: &str) -> String {
    format!("id\tstatus\n1\tfirst\n2\t{value}\n")
}

/// Response a [`ScriptedFetcher`] gives for one poll.
pub enum Scripted {
    Body(String),
    Fail(&'static str),
    Misconfigured(&'static str),
}

/// Returns scripted bodies in order, then repeats the final one.
#[derive(Clone)]
pub struct ScriptedFetcher {
    script: Arc<Mutex<VecDeque<Scripted>>>,
    last: Arc<Mutex<Option<String>>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedFetcher {
    pub fn new(script: Vec<Scripted>) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.into())),
            last: Arc::new(Mutex::new(None)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn bodies<I, S>(bodies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(bodies.into_iter().map(|b| Scripted::Body(b.into())).collect())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SheetFetcher for ScriptedFetcher {
    async fn fetch(&self) -> Result<Sheet> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Body(body)) => {
                *self.last.lock().unwrap() = Some(body.clone());
                parse_tsv(&body)
            }
            Some(Scripted::Fail(reason)) => Err(NotifierError::Fetch(reason.to_string())),
            Some(Scripted::Misconfigured(reason)) => Err(NotifierError::Config(reason.to_string())),
            None => match self.last.lock().unwrap().clone() {
                Some(body) => parse_tsv(&body),
                None => Err(NotifierError::EmptyResponse),
            },
        }
    }

    fn name(&self) -> String {
        "scripted".to_string()
    }
}

/// Records every message; optionally rejects them all.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
    attempts: Arc<AtomicUsize>,
    failing: Arc<Mutex<bool>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let notifier = Self::default();
        notifier.set_failing(true);
        notifier
    }

    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    /// Messages that were accepted.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    /// Every delivery attempt, accepted or not.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, message: &str) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if *self.failing.lock().unwrap() {
            return Err(NotifierError::Delivery("webhook returned HTTP 500".into()));
        }
        self.messages.lock().unwrap().push(message.to_string());
        Ok(())
    }
}

/// Serves exactly one HTTP response on 127.0.0.1 and hands back the raw
/// request it received.
pub struct StubServer {
    pub url: String,
    handle: JoinHandle<String>,
}

impl StubServer {
    pub async fn start(status_line: &'static str, body: impl Into<String>) -> Self {
        let body = body.into();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request = read_request(&mut stream).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: text/plain; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
            request
        });

        Self {
            url: format!("http://{addr}/hook"),
            handle,
        }
    }

    /// The raw request (headers and body) the server received.
    pub async fn request(self) -> String {
        self.handle.await.unwrap()
    }
}

async fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}

/// Client that ignores proxy settings from the environment.
pub fn direct_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
