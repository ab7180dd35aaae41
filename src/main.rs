use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use sparseflow::{
    bytes_moved, measure, reference_flow, write_csv, CooGraph, CsrGraph, EdgeCount, EllpackGraph,
    FlowConfig, FlowGraph, ReportRow, SparseRows, Strategy, LANE_WIDTH,
};

#[derive(Parser)]
#[command(author, version, about = "Weighted-flow (SpMV) benchmarks over sparse graph layouts")]
struct Cli {
    /// Timed iterations per measurement
    #[arg(long, default_value_t = 10, global = true)]
    iterations: usize,

    /// Worker threads for the parallel strategy (default: all cores)
    #[arg(long, global = true)]
    threads: Option<usize>,

    /// Strategies to run (default: all)
    #[arg(long, value_delimiter = ',', global = true)]
    strategies: Vec<Strategy>,

    /// CSV output path (default: stdout)
    #[arg(long, short, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Benchmark random graphs over a grid of sizes and densities
    Sweep {
        /// Smallest vertex count as a power of two
        #[arg(long, default_value_t = 10)]
        min_exp: u32,

        /// Largest vertex count as a power of two
        #[arg(long, default_value_t = 13)]
        max_exp: u32,

        /// Edge densities (edges / vertices²)
        #[arg(long, value_delimiter = ',', default_value = "0.001,0.005,0.01")]
        densities: Vec<f64>,

        /// Use fixed out-degree graphs of this degree instead of densities
        #[arg(long)]
        degree: Option<usize>,

        /// Random seed
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Benchmark a graph read from a Matrix Market file
    File {
        /// Path to a coordinate-format .mtx file
        path: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = FlowConfig::default();
    config.bench.iterations = cli.iterations;
    if let Some(threads) = cli.threads {
        config = config.with_threads(threads);
    }
    let strategies = if cli.strategies.is_empty() {
        Strategy::ALL.to_vec()
    } else {
        cli.strategies.clone()
    };

    let arch = config.architecture;
    info!(
        "architecture {:?}: {} native f32 lanes, kernels use {}",
        arch,
        arch.native_lanes::<f32>(),
        LANE_WIDTH
    );

    let mut rows = Vec::new();
    match &cli.command {
        Commands::Sweep {
            min_exp,
            max_exp,
            densities,
            degree,
            seed,
        } => {
            let mut rng = StdRng::seed_from_u64(*seed);
            for exp in *min_exp..=*max_exp {
                let vertices = 1usize << exp;
                let graphs: Vec<(f64, sparseflow::Result<CooGraph<f32>>)> = match degree {
                    Some(d) => vec![(
                        *d as f64 / vertices as f64,
                        CooGraph::random_regular(vertices, *d, &mut rng),
                    )],
                    None => densities
                        .iter()
                        .map(|&density| {
                            (density, CooGraph::random(vertices, EdgeCount::Density(density), &mut rng))
                        })
                        .collect(),
                };

                for (density, graph) in graphs {
                    match graph {
                        Ok(coo) => bench_graph(&coo, density, &strategies, &config, &mut rows)?,
                        Err(e) => warn!("skipping {} vertices at density {}: {}", vertices, density, e),
                    }
                }
            }
        }
        Commands::File { path } => {
            let coo: CooGraph<f32> = sparseflow::load_matrix_market(path)?;
            let n = coo.n_vertices() as f64;
            let density = if n > 0.0 { coo.edges().len() as f64 / (n * n) } else { 0.0 };
            bench_graph(&coo, density, &strategies, &config, &mut rows)?;
        }
    }

    match &cli.output {
        Some(path) => write_csv(BufWriter::new(File::create(path)?), &rows)?,
        None => write_csv(io::stdout().lock(), &rows)?,
    }
    Ok(())
}

/// Benchmarks every requested strategy plus the sprs baseline on one graph
///
/// Scalar and parallel kernels run on CSR. Vectorized kernels run on an
/// ELLPACK layout padded to `LANE_WIDTH`, and are skipped when some vertex
/// has more out-edges than that.
fn bench_graph(
    coo: &CooGraph<f32>,
    density: f64,
    strategies: &[Strategy],
    config: &FlowConfig,
    rows: &mut Vec<ReportRow>,
) -> sparseflow::Result<()> {
    let vertices = coo.n_vertices();
    let weights = coo.weights();
    let csr = CsrGraph::from_coo(coo);
    let ell = match EllpackGraph::from_coo(coo, Some(LANE_WIDTH)) {
        Ok(ell) => Some(ell),
        Err(e) => {
            if strategies.iter().any(Strategy::needs_uniform_rows) {
                warn!("no lane-width layout for {} vertices: {}", vertices, e);
            }
            None
        }
    };
    info!("{:?}", csr.describe());

    for strategy in strategies {
        let layout: &dyn SparseRows<f32> = match (strategy.needs_uniform_rows(), &ell) {
            (false, _) => &csr,
            (true, Some(ell)) => ell,
            (true, None) => continue,
        };
        let kernel = strategy.build::<f32>(&config.system_params)?;

        match measure(&config.bench, || kernel.compute(layout, weights)) {
            Ok(m) => {
                let bytes = bytes_moved::<f32>(layout.stored_entries(), vertices);
                info!("{} vertices, {}: {:.2} µs", vertices, strategy, m.mean_us);
                rows.push(ReportRow {
                    vertices,
                    density,
                    strategy: strategy.to_string(),
                    mean_us: m.mean_us,
                    bandwidth_gbps: Some(m.bandwidth_gbps(bytes)),
                });
            }
            Err(e) => warn!("skipping {}: {}", strategy, e),
        }
    }

    let m = measure(&config.bench, || reference_flow(&csr, weights))?;
    rows.push(ReportRow {
        vertices,
        density,
        strategy: "reference".to_string(),
        mean_us: m.mean_us,
        bandwidth_gbps: Some(m.bandwidth_gbps(bytes_moved::<f32>(csr.nnz(), vertices))),
    });
    Ok(())
}
