//! Edge event queue between the sensor interrupt and the render loop
//!
//! The platform's edge-detection handler only pushes an [`EdgeEvent`]; the
//! render loop is the single consumer that debounces and plays effects.
//! Built on `critical-section` and `heapless::Deque`, so pushing is safe from
//! interrupts and from other threads.

use core::cell::RefCell;

use critical_section::Mutex;
use embassy_time::Instant;
use heapless::Deque;
use log::warn;

/// A signal transition reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeEvent {
    /// GPIO the edge was seen on
    pub pin: u8,
    /// When the platform saw the edge
    pub at: Instant,
}

/// The queue had no room; the event was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("edge queue is full, dropped edge on pin {}", .0.pin)]
pub struct QueueFull(pub EdgeEvent);

struct QueueState<const SIZE: usize> {
    events: Deque<EdgeEvent, SIZE>,
    dropped: u32,
}

/// Bounded queue of pending edge events
pub struct EdgeQueue<const SIZE: usize> {
    inner: Mutex<RefCell<QueueState<SIZE>>>,
}

impl<const SIZE: usize> EdgeQueue<SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(QueueState {
                events: Deque::new(),
                dropped: 0,
            })),
        }
    }

    /// Handle for the edge-detection callback
    pub const fn sender(&self) -> EdgeSender<'_, SIZE> {
        EdgeSender { queue: self }
    }

    /// Handle for the render loop
    pub const fn receiver(&self) -> EdgeReceiver<'_, SIZE> {
        EdgeReceiver { queue: self }
    }

    fn push(&self, event: EdgeEvent) -> Result<(), QueueFull> {
        critical_section::with(|cs| {
            let mut state = self.inner.borrow(cs).borrow_mut();
            let pushed = state.events.push_back(event);
            if pushed.is_err() {
                state.dropped = state.dropped.saturating_add(1);
            }
            pushed.map_err(QueueFull)
        })
    }

    fn pop(&self) -> Option<EdgeEvent> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().events.pop_front())
    }

    fn discard(&self) -> usize {
        critical_section::with(|cs| {
            let mut state = self.inner.borrow(cs).borrow_mut();
            let pending = state.events.len();
            state.events.clear();
            pending
        })
    }

    /// Number of events waiting to be handled
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().events.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of events dropped because the queue was full
    pub fn dropped(&self) -> u32 {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().dropped)
    }
}

impl<const SIZE: usize> Default for EdgeQueue<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer side, handed to the edge-detection callback
#[derive(Clone, Copy)]
pub struct EdgeSender<'a, const SIZE: usize> {
    queue: &'a EdgeQueue<SIZE>,
}

impl<const SIZE: usize> EdgeSender<'_, SIZE> {
    /// Report an edge; never blocks
    pub fn notify(&self, event: EdgeEvent) -> Result<(), QueueFull> {
        self.queue.push(event).inspect_err(|err| warn!("{}", err))
    }
}

/// Consumer side, owned by the render loop
#[derive(Clone, Copy)]
pub struct EdgeReceiver<'a, const SIZE: usize> {
    queue: &'a EdgeQueue<SIZE>,
}

impl<const SIZE: usize> EdgeReceiver<'_, SIZE> {
    /// Oldest pending edge, if any
    pub fn try_receive(&self) -> Option<EdgeEvent> {
        self.queue.pop()
    }

    /// Drop every pending edge, returning how many there were
    pub fn discard_pending(&self) -> usize {
        self.queue.discard()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
