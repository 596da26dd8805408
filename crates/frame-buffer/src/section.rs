//! Critical-section seam between the buffer and the platform
//!
//! The consumer's read-advance-and-decrement sequence runs inside
//! [`CriticalSection::enter`]. [`InterruptFree`] defers to the
//! `critical-section` crate, so the platform layer decides what a section
//! means: masking the receive interrupt on a single-core target (via its
//! `set_impl!`), or a process-wide lock on hosts (the crate's `std`
//! feature). [`NoMask`] skips the section where the atomics are enough.

/// Mutual exclusion primitive supplied by the platform layer
pub trait CriticalSection {
    /// Run `f` with the producer held off
    fn enter<R>(&self, f: impl FnOnce() -> R) -> R;
}

/// Runs the closure directly
#[derive(Debug, Default, Clone, Copy)]
pub struct NoMask;

impl CriticalSection for NoMask {
    #[inline]
    fn enter<R>(&self, f: impl FnOnce() -> R) -> R {
        f()
    }
}

/// Runs the closure inside `critical_section::with`
#[derive(Debug, Default, Clone, Copy)]
pub struct InterruptFree;

impl CriticalSection for InterruptFree {
    #[inline]
    fn enter<R>(&self, f: impl FnOnce() -> R) -> R {
        critical_section::with(|_| f())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use critical_section::Mutex;

    #[test]
    fn test_no_mask_passes_result_through() {
        assert_eq!(NoMask.enter(|| 7), 7);
    }

    #[test]
    fn test_interrupt_free_nests_with_platform_sections() {
        let flag = Mutex::new(Cell::new(false));

        let seen = InterruptFree.enter(|| {
            critical_section::with(|cs| {
                flag.borrow(cs).set(true);
                flag.borrow(cs).get()
            })
        });

        assert!(seen);
    }
}
