use std::collections::HashMap;
use std::path::Path;

use rayon::prelude::*;

use mapart_dither::{CancelFlag, Palette};

use crate::error::AppError;
use crate::services::pipeline::{process, DitherJob, JobReport, JobSettings};

/// Process `jobs` on a dedicated rayon pool.
///
/// `threads` of `None` (or `Some(0)`) lets rayon pick one worker per core.
/// Each job owns its canvas and error buffer; only the palette and settings
/// are shared. Results come back in input order, and a failed job does not
/// stop the others. Outputs do not depend on the number of workers.
///
/// Fails before any work starts when two jobs would write the same output.
pub fn run_batch(
    jobs: &[DitherJob],
    palette: &Palette,
    settings: &JobSettings,
    threads: Option<usize>,
) -> Result<Vec<Result<JobReport, AppError>>, AppError> {
    run_batch_with_cancel(jobs, palette, settings, threads, None)
}

/// [`run_batch`] with a cancel flag shared by every job.
pub fn run_batch_with_cancel(
    jobs: &[DitherJob],
    palette: &Palette,
    settings: &JobSettings,
    threads: Option<usize>,
    cancel: Option<&CancelFlag>,
) -> Result<Vec<Result<JobReport, AppError>>, AppError> {
    check_unique_outputs(jobs)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads.unwrap_or(0))
        .thread_name(|i| format!("mapart-worker-{i}"))
        .build()
        .map_err(|e| AppError::Io(std::io::Error::other(e)))?;

    tracing::debug!(
        jobs = jobs.len(),
        threads = pool.current_num_threads(),
        "Starting batch"
    );

    Ok(pool.install(|| {
        jobs.par_iter()
            .map(|job| process(job, palette, settings, cancel))
            .collect()
    }))
}

/// Reject batches where two inputs map to the same output file.
///
/// Companion files share the output's directory and the input's stem, so a
/// unique dithered path keeps them apart as well.
pub fn check_unique_outputs(jobs: &[DitherJob]) -> Result<(), AppError> {
    let mut seen: HashMap<&Path, &Path> = HashMap::with_capacity(jobs.len());
    for job in jobs {
        if let Some(first) = seen.insert(&job.output, &job.input) {
            return Err(AppError::OutputCollision {
                output: job.output.clone(),
                first: first.to_path_buf(),
                second: job.input.clone(),
            });
        }
    }
    Ok(())
}
