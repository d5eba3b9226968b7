//! Events observed by the container, published through `nm`.
//!
//! Observations are only made on reallocation, never on the per-element hot paths, so the
//! overhead is amortized in the same way as the allocations themselves.

use nm::{Event, Magnitude};

const SLOT_COUNT_BUCKETS: &[Magnitude] = &[1, 2, 8, 64, 512, 4096, 32768, 262_144];

thread_local! {
    /// Slot count of every buffer allocated by a `RawMemory`.
    pub(crate) static ALLOCATED_SLOTS: Event = Event::builder()
        .name("placement_vec_allocated_slots")
        .histogram(SLOT_COUNT_BUCKETS)
        .build();

    /// Number of live elements moved from an old buffer into a new one.
    pub(crate) static RELOCATED_ELEMENTS: Event = Event::builder()
        .name("placement_vec_relocated_elements")
        .histogram(SLOT_COUNT_BUCKETS)
        .build();
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use nm::Report;

    use super::*;

    #[test]
    fn observations_show_up_in_report() {
        ALLOCATED_SLOTS.with(|e| e.observe(16_usize));
        RELOCATED_ELEMENTS.with(|e| e.observe(8_usize));

        let report = Report::collect();

        let names = report
            .events()
            .map(|event| event.name().to_string())
            .collect::<Vec<_>>();

        assert!(names.iter().any(|name| name == "placement_vec_allocated_slots"));
        assert!(names.iter().any(|name| name == "placement_vec_relocated_elements"));
    }
}
