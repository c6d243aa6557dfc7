use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaChaRng;

use crate::error::SimResult;
use crate::simulation::cluster::Cluster;
use crate::simulation::forces::ForcePass;

/// Helper to build a seeded reference cluster of size `n`
fn make_cluster(n: usize, force_pass: ForcePass) -> SimResult<Cluster> {
    let mut rng = ChaChaRng::seed_from_u64(7);
    Ok(Cluster::generate(n, true, &mut rng)?.with_force_pass(force_pass))
}

/// Average wall time of one `advance()` in ms
fn time_steps(cluster: &mut Cluster, steps: usize) -> f64 {
    // Warm-up
    cluster.advance();

    let t0 = Instant::now();
    for _ in 0..steps {
        cluster.advance();
    }
    t0.elapsed().as_secs_f64() * 1000.0 / steps as f64
}

/// Benchmark one step of the direct and parallel force passes for a range of n
/// Paste output directly into a spreadsheet to graph
pub fn bench_step() -> SimResult<()> {
    println!("N,direct_ms,parallel_ms");

    for n in (200..=3200).step_by(200) {
        // Small n: average over a few steps to smooth noise
        let steps = if n <= 800 { 5 } else { 1 };

        let mut direct = make_cluster(n, ForcePass::Direct)?;
        let mut parallel = make_cluster(n, ForcePass::Parallel)?;

        let ms_direct = time_steps(&mut direct, steps);
        let ms_parallel = time_steps(&mut parallel, steps);

        println!("{},{:.6},{:.6}", n, ms_direct, ms_parallel);
    }

    Ok(())
}
