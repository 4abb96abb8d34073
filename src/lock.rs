//! A minimal spinlock guarding heap-backed word arrays.
//!
//! The lock is a single [`AtomicBool`] acquired with a compare-and-swap loop.
//! While the flag is held by another thread, waiters spin on a plain load
//! with a bounded exponential [`Backoff`] so that contended cores are not
//! hammered with failing read-modify-write cycles.
//!
//! Acquisition is scoped: [`SpinLock::lock`] returns a [`SpinLockGuard`] that
//! releases the flag when dropped, on every exit path.

use core::{
    cell::UnsafeCell,
    fmt, hint,
    marker::PhantomData,
    ops::{Deref, DerefMut},
    sync::atomic::{AtomicBool, Ordering},
};

/// Number of doubling spin rounds before the backoff starts yielding.
pub const SPIN_LIMIT: u32 = 6;

/// Step at which the backoff stops growing.
pub const YIELD_LIMIT: u32 = 10;

/// A mutual-exclusion primitive that busy-waits instead of parking.
///
/// # Examples
///
/// ```
/// use smol_bitvec::lock::SpinLock;
///
/// let lock = SpinLock::new(vec![0u64; 4]);
/// {
///     let mut words = lock.lock();
///     words[2] = 7;
/// } // released here
/// assert_eq!(lock.lock()[2], 7);
/// ```
pub struct SpinLock<T: ?Sized> {
    locked: AtomicBool,
    value: UnsafeCell<T>,
}

// SAFETY: access to `value` is serialized by `locked`, so sharing the lock
// only requires that `T` may move between threads.
unsafe impl<T: ?Sized + Send> Send for SpinLock<T> {}
// SAFETY: see above.
unsafe impl<T: ?Sized + Send> Sync for SpinLock<T> {}

impl<T> SpinLock<T> {
    /// Creates an unlocked spinlock holding `value`.
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self {
            locked: AtomicBool::new(false),
            value: UnsafeCell::new(value),
        }
    }

    /// Consumes the lock and returns the protected value.
    pub fn into_inner(self) -> T {
        self.value.into_inner()
    }
}

impl<T: ?Sized> SpinLock<T> {
    /// Acquires the lock, spinning until it becomes available.
    ///
    /// There is no timeout; the caller relies on the holder releasing the
    /// lock after a short critical section.
    #[inline]
    pub fn lock(&self) -> SpinLockGuard<'_, T> {
        let mut backoff = Backoff::new();
        loop {
            if let Some(guard) = self.try_lock_weak() {
                return guard;
            }
            while self.locked.load(Ordering::Relaxed) {
                backoff.snooze();
            }
        }
    }

    /// Attempts to acquire the lock without waiting.
    ///
    /// # Examples
    ///
    /// ```
    /// use smol_bitvec::lock::SpinLock;
    ///
    /// let lock = SpinLock::new(1u64);
    /// let guard = lock.try_lock().unwrap();
    /// assert!(lock.try_lock().is_none());
    /// drop(guard);
    /// assert!(lock.try_lock().is_some());
    /// ```
    #[inline]
    pub fn try_lock(&self) -> Option<SpinLockGuard<'_, T>> {
        self.locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| self.guard())
    }

    #[inline(always)]
    fn try_lock_weak(&self) -> Option<SpinLockGuard<'_, T>> {
        self.locked
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| self.guard())
    }

    #[inline(always)]
    fn guard(&self) -> SpinLockGuard<'_, T> {
        SpinLockGuard {
            lock: self,
            _marker: PhantomData,
        }
    }

    /// Returns `true` if the lock is currently held.
    ///
    /// The answer may be stale by the time the caller observes it.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Relaxed)
    }

    /// Returns a mutable reference to the protected value.
    ///
    /// No locking is needed since `&mut self` guarantees exclusive access.
    pub fn get_mut(&mut self) -> &mut T {
        self.value.get_mut()
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for SpinLock<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.try_lock() {
            Some(guard) => f.debug_struct("SpinLock").field("value", &&*guard).finish(),
            None => f.write_str("SpinLock { <locked> }"),
        }
    }
}

/// RAII guard returned by [`SpinLock::lock`]; releases the lock on drop.
#[must_use = "if unused the SpinLock will immediately unlock"]
pub struct SpinLockGuard<'a, T: ?Sized> {
    lock: &'a SpinLock<T>,
    _marker: PhantomData<&'a mut T>,
}

impl<T: ?Sized> Deref for SpinLockGuard<'_, T> {
    type Target = T;

    #[inline(always)]
    fn deref(&self) -> &T {
        // SAFETY: the guard proves the lock is held by us.
        unsafe { &*self.lock.value.get() }
    }
}

impl<T: ?Sized> DerefMut for SpinLockGuard<'_, T> {
    #[inline(always)]
    fn deref_mut(&mut self) -> &mut T {
        // SAFETY: the guard proves the lock is held by us, and `&mut self`
        // rules out other borrows through this guard.
        unsafe { &mut *self.lock.value.get() }
    }
}

impl<T: ?Sized> Drop for SpinLockGuard<'_, T> {
    #[inline(always)]
    fn drop(&mut self) {
        self.lock.locked.store(false, Ordering::Release);
    }
}

/// Exponential backoff for spin-wait loops.
///
/// The first [`SPIN_LIMIT`] rounds issue `2^step` spin-loop hints. Past that,
/// each round yields the thread to the scheduler (with the `std` feature) or
/// spins a fixed `2^SPIN_LIMIT` hints (without it).
pub(crate) struct Backoff {
    step: u32,
}

impl Backoff {
    pub(crate) const fn new() -> Self {
        Self { step: 0 }
    }

    pub(crate) fn snooze(&mut self) {
        if self.step <= SPIN_LIMIT {
            for _ in 0..1u32 << self.step {
                hint::spin_loop();
            }
        } else {
            #[cfg(feature = "std")]
            std::thread::yield_now();
            #[cfg(not(feature = "std"))]
            for _ in 0..1u32 << SPIN_LIMIT {
                hint::spin_loop();
            }
        }

        if self.step <= YIELD_LIMIT {
            self.step += 1;
            if self.step == SPIN_LIMIT + 1 {
                log::debug!("spinlock contended past {SPIN_LIMIT} spin rounds; yielding");
            }
        }
    }

    #[cfg(test)]
    fn is_yielding(&self) -> bool {
        self.step > SPIN_LIMIT
    }
}
