//! Mock board source for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

use crate::board::BoardData;
use crate::loader::{BoardSource, LoadError};

#[derive(Debug)]
enum Scripted {
    Data(BoardData, Option<Duration>),
    Error(String),
}

/// Mock implementation of the BoardSource trait.
///
/// Scripted responses are returned in order, one per load. When the script
/// runs out, every load returns the default payload. Each load is counted so
/// tests can assert how often the source was hit.
#[derive(Debug)]
pub struct MockBoardSource {
    default_data: BoardData,
    script: Mutex<VecDeque<Scripted>>,
    loads: AtomicUsize,
}

impl Default for MockBoardSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBoardSource {
    /// Create a mock whose default payload is empty.
    pub fn new() -> Self {
        Self::with_data(BoardData::default())
    }

    /// Create a mock that returns `data` once the script is exhausted.
    pub fn with_data(data: BoardData) -> Self {
        Self {
            default_data: data,
            script: Mutex::new(VecDeque::new()),
            loads: AtomicUsize::new(0),
        }
    }

    /// Queue a successful load.
    pub async fn push_data(&self, data: BoardData) {
        self.script.lock().await.push_back(Scripted::Data(data, None));
    }

    /// Queue a successful load that completes after `delay`.
    pub async fn push_delayed(&self, data: BoardData, delay: Duration) {
        self.script
            .lock()
            .await
            .push_back(Scripted::Data(data, Some(delay)));
    }

    /// Queue a failed load.
    pub async fn push_error(&self, message: &str) {
        self.script
            .lock()
            .await
            .push_back(Scripted::Error(message.to_string()));
    }

    /// Number of loads performed so far.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BoardSource for MockBoardSource {
    async fn load(&self) -> Result<BoardData, LoadError> {
        self.loads.fetch_add(1, Ordering::SeqCst);

        let next = self.script.lock().await.pop_front();
        match next {
            Some(Scripted::Data(data, delay)) => {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                Ok(data)
            }
            Some(Scripted::Error(message)) => Err(LoadError::ApiError {
                status: 503,
                message,
            }),
            None => Ok(self.default_data.clone()),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
