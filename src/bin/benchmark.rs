//! Timing of next-generation computation: the local rules service against
//! the authoritative board server, at a few densities

use life_board::domain::{BoardSize, ConwayRule, Grid};
use life_board::service::{BoardServer, LifeService, next_generation};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::error::Error;
use std::time::Instant;

fn random_grid(size: u32, density: f64) -> Result<Grid, Box<dyn Error>> {
    let mut rng = StdRng::seed_from_u64(u64::from(size));
    let mut grid = Grid::with_board(BoardSize::new(size, size), 1)?;
    grid.randomize(&mut rng, density)?;
    Ok(grid)
}

/// Milliseconds per generation when the grid evolves from its own snapshot
fn benchmark_local(size: u32, density: f64, iterations: u32) -> Result<f64, Box<dyn Error>> {
    let mut grid = random_grid(size, density)?;

    let start = Instant::now();
    for _ in 0..iterations {
        let outcomes = next_generation(&ConwayRule, &grid.snapshot());
        grid.apply_generation(&outcomes)?;
    }
    Ok(start.elapsed().as_secs_f64() * 1000.0 / f64::from(iterations))
}

/// Milliseconds per generation for a board server seeded cell by cell
async fn benchmark_server(size: u32, density: f64, iterations: u32) -> Result<f64, Box<dyn Error>> {
    let seed = random_grid(size, density)?;
    let server = BoardServer::default();
    let records = server.create_board(BoardSize::new(size, size)).await?;

    for record in &records {
        let alive = seed.cell_at(record.coord()).is_some_and(|cell| cell.is_alive());
        if alive {
            server.update_cell_state(record.id, true).await?;
        }
    }

    let start = Instant::now();
    for _ in 0..iterations {
        server.compute_next_generation(&[]).await?;
    }
    Ok(start.elapsed().as_secs_f64() * 1000.0 / f64::from(iterations))
}

fn main() -> Result<(), Box<dyn Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread().build()?;

    println!("=== Game of Life Step Benchmark ===\n");
    println!("{:>10} {:>8} {:>12} {:>12}", "Size", "Density", "Local ms", "Server ms");
    println!("{:-<46}", "");

    let iterations = 20;
    for size in [50, 100, 200, 400] {
        for density in [0.05, 0.3] {
            let local_ms = benchmark_local(size, density, iterations)?;
            let server_ms = runtime.block_on(benchmark_server(size, density, iterations))?;
            println!(
                "{:>10} {:>8.2} {:>12.2} {:>12.2}",
                format!("{size}x{size}"),
                density,
                local_ms,
                server_ms
            );
        }
    }

    Ok(())
}
