//! Push-channel endpoints

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use rally_proto::TransportError;

/// Outbound side of one subscriber's push channel
pub trait GameClient {
    fn send_bytes(&self, bytes: &[u8]) -> Result<(), TransportError>;
}

/// In-process channel: the host pushes frames, the holder of a clone drains them
#[derive(Debug, Clone, Default)]
pub struct QueueClient {
    frames: Rc<RefCell<VecDeque<Vec<u8>>>>,
    closed: Rc<Cell<bool>>,
}

impl QueueClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every queued frame, oldest first
    pub fn drain(&self) -> Vec<Vec<u8>> {
        self.frames.borrow_mut().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.frames.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.borrow().is_empty()
    }

    /// Further sends fail with [`TransportError::Closed`]
    pub fn close(&self) {
        self.closed.set(true);
    }
}

impl GameClient for QueueClient {
    fn send_bytes(&self, bytes: &[u8]) -> Result<(), TransportError> {
        if self.closed.get() {
            return Err(TransportError::Closed);
        }
        self.frames.borrow_mut().push_back(bytes.to_vec());
        Ok(())
    }
}
