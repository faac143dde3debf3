//! Renderer shared between the render loop and other contexts
//!
//! One blocking mutex guards the whole renderer, so "compute frame, then
//! flush" is a single critical unit: a flame-up coming from another context
//! can never interleave with a flicker frame.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::StripDriver;
use crate::color::Rgb;
use crate::entropy::Entropy;
use crate::renderer::{FireRenderer, FlameEffectRequest, FlushError};

/// A [`FireRenderer`] behind one mutual-exclusion primitive
///
/// `M` picks the locking flavour (`CriticalSectionRawMutex`,
/// `ThreadModeRawMutex`, ...). Locks must not be nested.
pub struct SharedRenderer<M: RawMutex, D: StripDriver, E: Entropy, const MAX_LEDS: usize> {
    inner: Mutex<M, RefCell<FireRenderer<D, E, MAX_LEDS>>>,
}

impl<M, D, E, const MAX_LEDS: usize> SharedRenderer<M, D, E, MAX_LEDS>
where
    M: RawMutex,
    D: StripDriver,
    E: Entropy,
{
    pub fn new(renderer: FireRenderer<D, E, MAX_LEDS>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(renderer)),
        }
    }

    /// Run `f` with exclusive access to the renderer
    pub fn lock<R>(&self, f: impl FnOnce(&mut FireRenderer<D, E, MAX_LEDS>) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// Draw and flush one flicker frame as a single unit
    pub fn draw(&self, base: Rgb) -> Result<(), FlushError<D::Error>> {
        self.lock(|renderer| renderer.draw(base))
    }

    pub fn clear(&self) -> Result<(), FlushError<D::Error>> {
        self.lock(FireRenderer::clear)
    }

    /// Play a whole big flame, including its final clear, under the lock
    pub fn big_flame(&self, request: FlameEffectRequest) -> Result<(), FlushError<D::Error>> {
        self.lock(|renderer| renderer.big_flame(request))
    }

    pub fn into_inner(self) -> FireRenderer<D, E, MAX_LEDS> {
        self.inner.into_inner().into_inner()
    }
}
