// Allocator configuration
//
// mimalloc is the global allocator when the `mimalloc` feature is on. With
// `memory_tracking`, whatever allocator is underneath gets wrapped so the
// current and peak heap usage of parsed tables can be read from Elixir.

#[cfg(feature = "memory_tracking")]
mod tracking {
    use std::alloc::{GlobalAlloc, Layout};
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub static ALLOCATED: AtomicUsize = AtomicUsize::new(0);
    pub static PEAK_ALLOCATED: AtomicUsize = AtomicUsize::new(0);

    pub struct TrackingAllocator;

    #[cfg(feature = "mimalloc")]
    static UNDERLYING: mimalloc::MiMalloc = mimalloc::MiMalloc;

    #[cfg(not(feature = "mimalloc"))]
    static UNDERLYING: std::alloc::System = std::alloc::System;

    fn record_alloc(size: usize) {
        let current = ALLOCATED.fetch_add(size, Ordering::Relaxed) + size;
        PEAK_ALLOCATED.fetch_max(current, Ordering::Relaxed);
    }

    unsafe impl GlobalAlloc for TrackingAllocator {
        unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
            let ptr = UNDERLYING.alloc(layout);
            if !ptr.is_null() {
                record_alloc(layout.size());
            }
            ptr
        }

        unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
            ALLOCATED.fetch_sub(layout.size(), Ordering::Relaxed);
            UNDERLYING.dealloc(ptr, layout)
        }
    }
}

#[cfg(feature = "memory_tracking")]
#[global_allocator]
static GLOBAL: tracking::TrackingAllocator = tracking::TrackingAllocator;

// Without tracking, use mimalloc directly (no overhead)
#[cfg(all(feature = "mimalloc", not(feature = "memory_tracking")))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Current Rust heap allocation in bytes. 0 without `memory_tracking`.
pub fn allocated() -> usize {
    #[cfg(feature = "memory_tracking")]
    {
        tracking::ALLOCATED.load(std::sync::atomic::Ordering::SeqCst)
    }
    #[cfg(not(feature = "memory_tracking"))]
    {
        0
    }
}

/// Peak heap allocation since the last reset. 0 without `memory_tracking`.
pub fn peak_allocated() -> usize {
    #[cfg(feature = "memory_tracking")]
    {
        tracking::PEAK_ALLOCATED.load(std::sync::atomic::Ordering::SeqCst)
    }
    #[cfg(not(feature = "memory_tracking"))]
    {
        0
    }
}

/// Reset the peak to the current allocation. Returns `(current, old_peak)`.
pub fn reset_peak() -> (usize, usize) {
    #[cfg(feature = "memory_tracking")]
    {
        use std::sync::atomic::Ordering;
        let current = tracking::ALLOCATED.load(Ordering::SeqCst);
        let peak = tracking::PEAK_ALLOCATED.swap(current, Ordering::SeqCst);
        (current, peak)
    }
    #[cfg(not(feature = "memory_tracking"))]
    {
        (0, 0)
    }
}
