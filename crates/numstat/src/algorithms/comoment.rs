//! Sliding-window co-moment updates.
//!
//! ## Purpose
//!
//! This module maintains the co-moment `C = Σ(x-x̄)(y-ȳ)` and the second
//! moments `M2x`, `M2y` of the last `W` pairs in O(1) per push. The moving
//! covariance and moving correlation accumulators are thin views over it.
//!
//! ## Design notes
//!
//! * **Filling**: Welford updates while fewer than `W` pairs have been seen.
//! * **Sliding**: Once full, the evicted pair's contribution is removed and the
//!   incoming pair's added in one step, shifting the means by `(x - x0) / W`.
//! * **NaN poisoning**: An incoming NaN makes every moment NaN and marks the
//!   window full. Moments stay NaN until the NaN is evicted, at which point the
//!   state is rebuilt from the incoming pair and the rest of the ring.
//!
//! ## Key concepts
//!
//! With pre-update means `m`, outgoing `(x0, y0)` and incoming `(xn, yn)`:
//!
//! ```text
//! C'   = C + (xn-mx)(yn-my) - (x0-mx)(y0-my) - (xn-x0)(yn-y0)/W
//! mx'  = mx + (xn-x0)/W
//! M2x' = M2x + (xn-x0)((x0-mx) + (xn-mx'))
//! ```
//!
//! With known means the correction term vanishes and the means never move.
//!
//! ## Invariants
//!
//! * `count <= window`, and `count == window` whenever any moment is NaN.
//! * The ring always holds the last `min(pushes, W)` pairs.
//!
//! ## Non-goals
//!
//! * Normalizing the moments into a statistic; see the online adapters.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::buffer::PairRing;

// ============================================================================
// Centering
// ============================================================================

/// How the moments are centered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Centering<T> {
    /// Means are estimated from the window.
    Sample,

    /// Means are fixed in advance.
    Known {
        /// Mean of `x`.
        mean_x: T,
        /// Mean of `y`.
        mean_y: T,
    },
}

// ============================================================================
// Sliding Co-Moment State
// ============================================================================

/// Co-moment and second moments over a sliding window of `(x, y)` pairs.
#[derive(Debug, Clone)]
pub struct SlidingComoment<T> {
    ring: PairRing<T>,
    centering: Centering<T>,
    count: usize,
    mean_x: T,
    mean_y: T,
    comoment: T,
    m2x: T,
    m2y: T,
}

impl<T: Float> SlidingComoment<T> {
    /// Empty state over a window of `window` pairs. `window` must be positive.
    pub fn new(window: usize, centering: Centering<T>) -> Self {
        let (mean_x, mean_y) = match centering {
            Centering::Sample => (T::zero(), T::zero()),
            Centering::Known { mean_x, mean_y } => (mean_x, mean_y),
        };
        Self {
            ring: PairRing::new(window),
            centering,
            count: 0,
            mean_x,
            mean_y,
            comoment: T::zero(),
            m2x: T::zero(),
            m2y: T::zero(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Window capacity.
    #[inline]
    pub fn window(&self) -> usize {
        self.ring.window()
    }

    /// Pairs currently counted (caps at the window capacity).
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether the window has been filled.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.count == self.window()
    }

    /// Centering mode.
    #[inline]
    pub fn centering(&self) -> Centering<T> {
        self.centering
    }

    /// Current means `(x̄, ȳ)`.
    #[inline]
    pub fn means(&self) -> (T, T) {
        (self.mean_x, self.mean_y)
    }

    /// Co-moment `Σ(x-x̄)(y-ȳ)`.
    #[inline]
    pub fn comoment(&self) -> T {
        self.comoment
    }

    /// Second moment of `x`.
    #[inline]
    pub fn m2x(&self) -> T {
        self.m2x
    }

    /// Second moment of `y`.
    #[inline]
    pub fn m2y(&self) -> T {
        self.m2y
    }

    /// Normalizing divisor for the current window, `None` before any push.
    ///
    /// Sample centering divides by `count - 1`, known centering by `count`.
    pub fn divisor(&self) -> Option<T> {
        if self.count == 0 {
            return None;
        }
        let n = match self.centering {
            Centering::Sample => self.count - 1,
            Centering::Known { .. } => self.count,
        };
        Some(cast(n))
    }

    // ========================================================================
    // Updates
    // ========================================================================

    /// Record `(x, y)`, evicting the oldest pair once the window is full.
    pub fn push(&mut self, x: T, y: T) {
        let window = self.window();
        let slot = self.ring.advance();

        if x.is_nan() || y.is_nan() {
            self.poison();
        } else if self.count < window {
            self.count += 1;
            self.accumulate(x, y);
        } else if window == 1 {
            self.reset();
            self.count = 1;
            self.accumulate(x, y);
        } else {
            let (x0, y0) = self.ring.get(slot);
            if x0.is_nan() || y0.is_nan() {
                self.rescan(slot, x, y);
            } else if !self.comoment.is_nan() {
                self.slide(x0, y0, x, y);
            }
        }

        self.ring.set(slot, x, y);
    }

    // Fold one pair into the moments; `count` already includes it.
    fn accumulate(&mut self, x: T, y: T) {
        match self.centering {
            Centering::Sample => {
                let n = cast::<T>(self.count);
                let dx = x - self.mean_x;
                self.mean_x = self.mean_x + dx / n;
                self.m2x = self.m2x + dx * (x - self.mean_x);

                let dy = y - self.mean_y;
                self.mean_y = self.mean_y + dy / n;
                let dy_n = y - self.mean_y;
                self.m2y = self.m2y + dy * dy_n;

                self.comoment = self.comoment + dx * dy_n;
            }
            Centering::Known { .. } => {
                let dx = x - self.mean_x;
                let dy = y - self.mean_y;
                self.m2x = self.m2x + dx * dx;
                self.m2y = self.m2y + dy * dy;
                self.comoment = self.comoment + dx * dy;
            }
        }
    }

    // Replace `(x0, y0)` with `(x, y)` in a full window.
    fn slide(&mut self, x0: T, y0: T, x: T, y: T) {
        let dx0 = x0 - self.mean_x;
        let dy0 = y0 - self.mean_y;
        let dx_n = x - self.mean_x;
        let dy_n = y - self.mean_y;

        match self.centering {
            Centering::Sample => {
                let w = cast::<T>(self.window());
                let dx = dx_n - dx0;
                let dy = dy_n - dy0;

                self.comoment = self.comoment + dx_n * dy_n - dx0 * dy0 - dx * dy / w;

                self.mean_x = self.mean_x + dx / w;
                self.mean_y = self.mean_y + dy / w;

                self.m2x = self.m2x + dx * (dx0 + (x - self.mean_x));
                self.m2y = self.m2y + dy * (dy0 + (y - self.mean_y));
            }
            Centering::Known { .. } => {
                self.comoment = self.comoment + dx_n * dy_n - dx0 * dy0;
                self.m2x = self.m2x + (dx_n - dx0) * (dx_n + dx0);
                self.m2y = self.m2y + (dy_n - dy0) * (dy_n + dy0);
            }
        }
    }

    // Rebuild from the incoming pair and every other ring slot, in slot order.
    fn rescan(&mut self, slot: usize, x: T, y: T) {
        self.reset();
        self.count = 1;
        self.accumulate(x, y);

        for k in 0..self.window() {
            if k == slot {
                continue;
            }
            let (bx, by) = self.ring.get(k);
            if bx.is_nan() || by.is_nan() {
                self.poison();
                return;
            }
            self.count += 1;
            self.accumulate(bx, by);
        }
    }

    fn poison(&mut self) {
        self.count = self.window();
        self.comoment = T::nan();
        self.m2x = T::nan();
        self.m2y = T::nan();
    }

    fn reset(&mut self) {
        if let Centering::Sample = self.centering {
            self.mean_x = T::zero();
            self.mean_y = T::zero();
        }
        self.comoment = T::zero();
        self.m2x = T::zero();
        self.m2y = T::zero();
    }
}

#[inline]
fn cast<T: Float>(n: usize) -> T {
    T::from(n).unwrap_or_else(T::infinity)
}
