//! Build whole grids, recompute them and check the fields agree with each other
//!

use bevy::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use simple_flowfield::prelude::*;

/// Create a grid with a random mix of open, rough and impassable cells
fn random_grid(rng: &mut StdRng, mode: RelaxationMode) -> Grid {
	let rows = rng.random_range(1..=12);
	let columns = rng.random_range(1..=12);
	let mut grid = Grid::new(rows, columns, 8.0).unwrap();
	grid.set_relaxation_mode(mode);
	for index in 0..grid.size() {
		let cost = if rng.random_bool(0.2) {
			COST_MAX
		} else {
			rng.random_range(COST_MIN..COST_MAX)
		};
		grid.set_cost(index, cost).unwrap();
	}
	let target = rng.random_range(0..grid.size());
	grid.set_target(Some(target));
	grid
}

/// Same layout as [random_grid] for a fresh generator of the same seed
fn random_pair(seed: u64) -> (Grid, Grid) {
	let fifo = random_grid(&mut StdRng::seed_from_u64(seed), RelaxationMode::Fifo);
	let dijkstra = random_grid(&mut StdRng::seed_from_u64(seed), RelaxationMode::Dijkstra);
	(fifo, dijkstra)
}

/// Integration value of stepping from `centre` onto `neighbour`
fn step(grid: &Grid, centre: usize, neighbour: usize) -> u8 {
	let dims = grid.get_dimensions();
	let total = dims.distance(centre, neighbour)
		+ grid.get_cost(neighbour).unwrap() as u32
		+ grid.get_cost(centre).unwrap() as u32
		+ grid.get_integration(centre).unwrap() as u32;
	total.min(INTEGR_MAX as u32) as u8
}

#[test]
fn walls_and_target_hold_in_both_modes() {
	for seed in 0..200 {
		let (mut fifo, mut dijkstra) = random_pair(seed);
		for grid in [&mut fifo, &mut dijkstra] {
			grid.recompute().unwrap();
			let target = grid.get_target().unwrap();
			for index in 0..grid.size() {
				if grid.get_cost(index).unwrap() == COST_MAX {
					assert_eq!(INTEGR_MAX, grid.get_integration(index).unwrap(), "seed {}", seed);
					assert_eq!(Vec2::ZERO, grid.get_flow(index).unwrap(), "seed {}", seed);
				}
			}
			if grid.get_cost(target).unwrap() != COST_MAX {
				assert_eq!(INTEGR_MIN, grid.get_integration(target).unwrap(), "seed {}", seed);
			}
		}
	}
}

#[test]
fn every_reached_cell_has_a_cheaper_neighbour() {
	for seed in 0..200 {
		let (mut fifo, mut dijkstra) = random_pair(seed);
		for grid in [&mut fifo, &mut dijkstra] {
			grid.recompute().unwrap();
			let target = grid.get_target().unwrap();
			let dims = *grid.get_dimensions();
			for index in 0..grid.size() {
				let value = grid.get_integration(index).unwrap();
				if index == target || value == INTEGR_MAX {
					continue;
				}
				let cheaper = dims
					.neighbours(index)
					.any(|n| grid.get_integration(n).unwrap() < value);
				assert!(cheaper, "seed {} cell {} has no way downhill", seed, index);
			}
		}
	}
}

#[test]
fn dijkstra_cannot_be_relaxed_further() {
	for seed in 0..200 {
		let (_, mut grid) = random_pair(seed);
		grid.recompute().unwrap();
		let dims = *grid.get_dimensions();
		for centre in 0..grid.size() {
			if grid.get_integration(centre).unwrap() == INTEGR_MAX {
				continue;
			}
			for n in dims.neighbours(centre) {
				if grid.get_cost(n).unwrap() == COST_MAX {
					continue;
				}
				assert!(
					grid.get_integration(n).unwrap() <= step(&grid, centre, n),
					"seed {} cell {} can be improved from {}",
					seed,
					n,
					centre
				);
			}
		}
	}
}

#[test]
fn dijkstra_is_never_dearer_than_fifo() {
	for seed in 0..200 {
		let (mut fifo, mut dijkstra) = random_pair(seed);
		let fifo_report = fifo.recompute().unwrap();
		let dijkstra_report = dijkstra.recompute().unwrap();
		assert!(!fifo_report.is_degraded());
		assert!(!dijkstra_report.is_degraded());
		for (f, d) in fifo
			.get_integration_field()
			.get()
			.iter()
			.zip(dijkstra.get_integration_field().get())
		{
			assert!(d <= f, "seed {}", seed);
		}
	}
}

#[test]
fn flow_is_unit_or_zero() {
	for seed in 0..100 {
		let (mut grid, _) = random_pair(seed);
		grid.recompute().unwrap();
		for index in 0..grid.size() {
			let flow = grid.get_flow(index).unwrap();
			if grid.get_integration(index).unwrap() == INTEGR_MAX {
				assert_eq!(Vec2::ZERO, flow);
			} else {
				assert!(flow == Vec2::ZERO || (flow.length() - 1.0).abs() < 1e-5, "seed {}", seed);
			}
		}
	}
}

#[test]
fn relaxation_limit_is_respected() {
	for seed in 0..100 {
		let (mut fifo, mut dijkstra) = random_pair(seed);
		for grid in [&mut fifo, &mut dijkstra] {
			grid.set_relaxation_limit(Some(5));
			let report = grid.recompute().unwrap();
			assert!(report.get_relaxations() <= 5, "seed {}", seed);
		}
	}
}

#[test]
#[cfg(feature = "ron")]
fn maze_from_ron() {
	let path = env!("CARGO_MANIFEST_DIR").to_string() + "/assets/cost_field_maze.ron";
	let grid = Grid::new(10, 10, 32.0).unwrap();
	let cost_field = CostField::from_ron(&path, grid.get_dimensions()).unwrap();
	let mut grid = grid.with_cost_field(cost_field).unwrap();
	// bottom right corner
	grid.set_target(Some(99));
	grid.recompute().unwrap();
	// the open top left corner is reached through the maze
	assert!(grid.get_integration(0).unwrap() < INTEGR_MAX);
	// walls are never reached
	assert_eq!(INTEGR_MAX, grid.get_integration(90).unwrap());
	assert_eq!(INTEGR_MAX, grid.get_integration(4).unwrap());
	let flow = grid.get_flow_at_position(Vec2::new(16.0, 16.0)).unwrap();
	assert!((flow.length() - 1.0).abs() < 1e-5);
}

#[test]
#[cfg(feature = "ron")]
fn grid_from_settings_file() {
	let path = env!("CARGO_MANIFEST_DIR").to_string() + "/assets/grid_settings.ron";
	let settings = GridSettings::from_ron(&path).unwrap();
	let mut grid = Grid::from_settings(&settings).unwrap();
	assert_eq!(RelaxationMode::Dijkstra, grid.get_relaxation_mode());
	// row 3, column 5
	let target = grid.world_to_cell_index(Vec2::new(96.0, 160.0)).unwrap();
	assert_eq!(35, target);
	grid.set_target(Some(target));
	let report = grid.recompute().unwrap();
	// every reached cell is expanded exactly once
	let reached = grid
		.get_integration_field()
		.get()
		.iter()
		.filter(|v| **v != INTEGR_MAX)
		.count();
	assert_eq!(reached, report.get_popped());
}
