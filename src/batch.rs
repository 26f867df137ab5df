//! Batch coordination.
//!
//! Fans a list of [`ImageConfig`]s out to the
//! [single-image processor](crate::process) and collects one [`Outcome`] per
//! item, in input order.
//!
//! ## Concurrency
//!
//! Work runs on a dedicated rayon pool of `jobs` threads. Each worker holds at
//! most one decoded image at a time, so peak memory is proportional to the
//! pool size and the largest image rather than to the batch size. Items finish
//! in any order; `collect` on the indexed parallel iterator puts outcome `i`
//! at position `i` regardless.
//!
//! The coordinator does not catch anything itself. The processor turns every
//! failure into a failed outcome, which is what keeps one bad image from
//! affecting the rest of the batch.

use crate::imaging::{ImageBackend, RustBackend};
use crate::process::process_image_with_backend;
use crate::types::{ImageConfig, Outcome};
use rayon::prelude::*;
use tracing::{info, warn};

/// Process every item with the default [`RustBackend`] on `jobs` threads.
pub fn process_batch(configs: &[ImageConfig], jobs: usize) -> Vec<Outcome> {
    process_batch_with_backend(&RustBackend::new(), configs, jobs)
}

/// Process every item using a specific backend (allows testing with mock).
pub fn process_batch_with_backend<B: ImageBackend>(
    backend: &B,
    configs: &[ImageConfig],
    jobs: usize,
) -> Vec<Outcome> {
    let jobs = jobs.max(1);
    info!(images = configs.len(), jobs, "processing batch");

    let outcomes: Vec<Outcome> = match rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .thread_name(|i| format!("imgbatch-worker-{i}"))
        .build()
    {
        Ok(pool) => pool.install(|| {
            configs
                .par_iter()
                .map(|config| process_one(backend, config))
                .collect()
        }),
        Err(e) => {
            warn!(error = %e, "could not start worker pool, processing sequentially");
            configs
                .iter()
                .map(|config| process_one(backend, config))
                .collect()
        }
    };

    let failed = outcomes.iter().filter(|o| !o.is_success()).count();
    info!(succeeded = outcomes.len() - failed, failed, "batch complete");
    outcomes
}

fn process_one<B: ImageBackend>(backend: &B, config: &ImageConfig) -> Outcome {
    process_image_with_backend(
        backend,
        &config.input_path,
        &config.output_path,
        &config.options,
    )
}
