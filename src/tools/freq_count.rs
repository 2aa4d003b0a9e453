use rayon::prelude::*;

/// Inputs at or below this size are counted on the calling thread.
const PARALLEL_THRESHOLD: usize = 64 * 1024;
/// Bytes handed to each rayon task.
const CHUNK_SIZE: usize = 16 * 1024;

type Histogram = [u64; 256];

/// Count one slice into an existing histogram.
fn count_into(mut hist: Histogram, chunk: &[u8]) -> Histogram {
    chunk.iter().for_each(|&b| hist[b as usize] += 1);
    hist
}

/// Returns how often each byte value occurs in data (index = byte value), as the 256 counts
/// tree_from_freqs expects. Large inputs are split into chunks counted in parallel.
pub fn freqs(data: &[u8]) -> Vec<u64> {
    let hist = if data.len() > PARALLEL_THRESHOLD {
        data.par_chunks(CHUNK_SIZE)
            .fold(|| [0_u64; 256], count_into)
            .reduce(
                || [0_u64; 256],
                |mut total, part| {
                    total.iter_mut().zip(part.iter()).for_each(|(t, p)| *t += p);
                    total
                },
            )
    } else {
        count_into([0; 256], data)
    };
    hist.to_vec()
}
