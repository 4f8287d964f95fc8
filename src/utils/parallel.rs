/// Parallel processing utilities

/// Number of worker threads to use for a `--threads` value (0 = all cores)
pub fn resolve_thread_count(threads: usize) -> usize {
    if threads == 0 {
        num_cpus::get()
    } else {
        threads
    }
}

pub fn configure_thread_pool(threads: usize) -> Result<(), rayon::ThreadPoolBuildError> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(resolve_thread_count(threads))
        .build_global()
}
