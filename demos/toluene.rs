use std::time::Instant;
use tracing_subscriber::EnvFilter;
use zx_opt::{
    circuit::reduction_percent,
    hamiltonian::Hamiltonian,
    optimize,
    trotter::TrotterEvolution,
};

fn timeit<F, T>(mut f: F) -> (T, f64)
where F: FnMut() -> T
{
    let t0 = Instant::now();
    let out: T = f();
    (out, (Instant::now() - t0).as_secs_f64())
}

// Synthesize a single first-order Trotter step for the dipolar Hamiltonian of
// toluene and run it through the optimizer.
//
// Set RUST_LOG=zx_opt=debug to see the individual stages.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let h = Hamiltonian::toluene();
    let circuit = TrotterEvolution::new(h, 0.5, 1).first_order()?;

    let (res, t) = timeit(|| optimize(&circuit));
    let res = res?;
    println!("optimized in {:.3} s", t);
    println!("before:\n{}", res.before);
    println!("after:\n{}", res.after);
    println!(
        "rewrites: {} ({} -> {} nodes)",
        res.simplify.rewrites(),
        res.simplify.nodes_before,
        res.simplify.nodes_after,
    );
    match reduction_percent(res.before.cx, res.after.cx) {
        Some(p) => println!("CX reduction: {:.1}%", p),
        None => println!("CX reduction: n/a"),
    }
    Ok(())
}
