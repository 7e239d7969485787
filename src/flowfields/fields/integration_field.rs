//! The IntegrationField contains an 8-bit value for every cell and it uses a
//! [CostField] to produce a cumulative cost of reaching the target.
//!
//! When the field is calculated every cell is reset to [INTEGR_MAX] and the
//! target cell is set to [INTEGR_MIN]. The target is then pushed onto a
//! worklist and a wavefront expands from it:
//!
//! 1. Pop the front cell of the worklist, the "centre"
//! 2. For each in-bounds Moore neighbour of the centre that is not a wall,
//!    calculate `distance + neighbour cost + centre cost + centre integration`
//! 3. If that is cheaper than the neighbour's current integration value then
//!    store it, and if the neighbour had never been reached before push it
//!    onto the worklist
//! 4. Repeat until the worklist is empty
//!
//! The distance between cells is Manhattan so a diagonal step is charged
//! `2` and an orthogonal step `1`. Over open terrain this produces a diamond
//! pattern as the wave expands (the underlying `CostField` values are `0`
//! here):
//!
//! ```text
//!  _____________________________
//! |     |     |     |     |     |
//! |  4  |  3  |  2  |  3  |  4  |
//! |_____|_____|_____|_____|_____|
//! |     |     |     |     |     |
//! |  3  |  2  |  1  |  2  |  3  |
//! |_____|_____|_____|_____|_____|
//! |     |     |     |     |     |
//! |  2  |  1  |  0  |  1  |  2  |
//! |_____|_____|_____|_____|_____|
//! |     |     |     |     |     |
//! |  3  |  2  |  1  |  2  |  3  |
//! |_____|_____|_____|_____|_____|
//! |     |     |     |     |     |
//! |  4  |  3  |  2  |  3  |  4  |
//! |_____|_____|_____|_____|_____|
//! ```
//!
//! Walls, [COST_MAX], are never entered so they and anything sealed off
//! behind them keep the [INTEGR_MAX] value. Costs saturate at [INTEGR_MAX]
//! as well, so a cell whose cheapest route is that expensive is treated as
//! unreachable.
//!
//! Each cell is pushed onto the worklist at most once, but its value can
//! still drop after it has been popped. Cells already relaxed from the old
//! value are not revisited, so with varied costs the [RelaxationMode::Fifo]
//! field is an approximation of the cheapest cost-to-target rather than the
//! exact value. [RelaxationMode::Dijkstra] pops the cheapest cell first and
//! re-queues every improvement, which yields exact values at the price of a
//! binary heap.
//!

use std::{
	cmp::Reverse,
	collections::{BinaryHeap, VecDeque},
};

use crate::flowfields::fields::index_out_of_range;
use crate::prelude::*;
use bevy::prelude::*;

/// How the wavefront is ordered when calculating an [IntegrationField]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Reflect)]
pub enum RelaxationMode {
	/// First-in first-out worklist, each cell queued at most once
	#[default]
	Fifo,
	/// Min-heap keyed on the current integration value, every improvement is queued
	Dijkstra,
}

/// Describes the work done by a single calculation of an [IntegrationField]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IntegrationReport {
	/// Number of cells taken from the worklist and expanded
	popped: usize,
	/// Number of times a cell had its integration value lowered
	relaxations: usize,
	/// The relaxation limit was hit and the wavefront stopped early
	degraded: bool,
}

impl IntegrationReport {
	/// Number of cells taken from the worklist and expanded
	pub fn get_popped(&self) -> usize {
		self.popped
	}
	/// Number of times a cell had its integration value lowered
	pub fn get_relaxations(&self) -> usize {
		self.relaxations
	}
	/// Whether the calculation stopped before reaching its fixed point
	pub fn is_degraded(&self) -> bool {
		self.degraded
	}
}

/// Cost-to-target of every cell, [INTEGR_MAX] marks cells never reached
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug)]
pub struct IntegrationField {
	/// Cost-to-target of each cell
	values: Vec<u8>,
	/// Reusable FIFO worklist, drained by the end of every calculation
	#[cfg_attr(feature = "serde", serde(skip))]
	worklist: VecDeque<usize>,
	/// Reusable heap for [RelaxationMode::Dijkstra], drained by the end of every calculation
	#[cfg_attr(feature = "serde", serde(skip))]
	heap: BinaryHeap<Reverse<(u8, usize)>>,
}

impl Field<u8> for IntegrationField {
	/// Get a reference to the field array
	fn get(&self) -> &[u8] {
		&self.values
	}
	/// Retrieve a field cell value
	fn get_field_cell_value(&self, index: usize) -> Result<u8, FlowFieldError> {
		self.values
			.get(index)
			.copied()
			.ok_or_else(|| index_out_of_range(index, self.values.len()))
	}
	/// Set a field cell to a value
	fn set_field_cell_value(&mut self, value: u8, index: usize) -> Result<(), FlowFieldError> {
		let size = self.values.len();
		let cell = self
			.values
			.get_mut(index)
			.ok_or_else(|| index_out_of_range(index, size))?;
		*cell = value;
		Ok(())
	}
}

/// Integration cost of stepping onto a neighbour from a centre cell, saturating at [INTEGR_MAX]
fn step_cost(distance: u32, neighbour_cost: u8, centre_cost: u8, centre_integration: u8) -> u8 {
	let total = distance
		+ neighbour_cost as u32
		+ centre_cost as u32
		+ centre_integration as u32;
	total.min(INTEGR_MAX as u32) as u8
}

impl IntegrationField {
	/// Creates a new [IntegrationField] of `size` cells, all of them unreached
	pub fn new(size: usize) -> Self {
		IntegrationField {
			values: vec![INTEGR_MAX; size],
			worklist: VecDeque::with_capacity(size),
			heap: BinaryHeap::new(),
		}
	}
	/// Reset all the cells of the [IntegrationField] to [INTEGR_MAX] apart
	/// from the `target` which is the starting point of calculating the field
	/// and is set to [INTEGR_MIN]
	pub fn reset(&mut self, target: usize) {
		self.values.fill(INTEGR_MAX);
		if let Some(cell) = self.values.get_mut(target) {
			*cell = INTEGR_MIN;
		}
	}
	/// From the `target` cell iterate over successive neighbouring cells and
	/// calculate the field values from the `cost_field`.
	///
	/// Returns [None] without touching the field if `target` is not a cell
	/// of `dimensions`. A `target` sitting on a wall leaves every cell
	/// unreached. When `relaxation_limit` is set the wavefront stops after
	/// that many relaxations and the report is flagged as degraded
	pub fn calculate_field(
		&mut self,
		target: usize,
		cost_field: &CostField,
		dimensions: &GridDimensions,
		mode: RelaxationMode,
		relaxation_limit: Option<usize>,
	) -> Option<IntegrationReport> {
		if !dimensions.is_in_bounds(target) {
			return None;
		}
		if cost_field.is_impassable(target) {
			self.values.fill(INTEGR_MAX);
			return Some(IntegrationReport::default());
		}
		self.reset(target);
		let report = match mode {
			RelaxationMode::Fifo => {
				self.propagate_fifo(target, cost_field.get(), dimensions, relaxation_limit)
			}
			RelaxationMode::Dijkstra => {
				self.propagate_dijkstra(target, cost_field.get(), dimensions, relaxation_limit)
			}
		};
		Some(report)
	}
	/// Expand the wavefront in first-in first-out order, a cell is only
	/// queued the first time it is reached
	fn propagate_fifo(
		&mut self,
		target: usize,
		costs: &[u8],
		dimensions: &GridDimensions,
		relaxation_limit: Option<usize>,
	) -> IntegrationReport {
		let mut report = IntegrationReport::default();
		self.worklist.clear();
		self.worklist.push_back(target);
		'wavefront: while let Some(centre) = self.worklist.pop_front() {
			report.popped += 1;
			let centre_cost = costs[centre];
			let centre_integration = self.values[centre];
			for n in dimensions.neighbours(centre) {
				let neighbour_cost = costs[n];
				// ignore impassable cells
				if neighbour_cost == COST_MAX {
					continue;
				}
				let candidate = step_cost(
					dimensions.distance(n, centre),
					neighbour_cost,
					centre_cost,
					centre_integration,
				);
				if candidate < self.values[n] {
					if relaxation_limit.is_some_and(|limit| report.relaxations >= limit) {
						report.degraded = true;
						break 'wavefront;
					}
					if self.values[n] == INTEGR_MAX {
						self.worklist.push_back(n);
					}
					self.values[n] = candidate;
					report.relaxations += 1;
				}
			}
		}
		self.worklist.clear();
		report
	}
	/// Expand the wavefront cheapest cell first, every improvement is queued
	/// and stale heap entries are skipped when popped
	fn propagate_dijkstra(
		&mut self,
		target: usize,
		costs: &[u8],
		dimensions: &GridDimensions,
		relaxation_limit: Option<usize>,
	) -> IntegrationReport {
		let mut report = IntegrationReport::default();
		self.heap.clear();
		self.heap.push(Reverse((INTEGR_MIN, target)));
		'wavefront: while let Some(Reverse((value, centre))) = self.heap.pop() {
			if value > self.values[centre] {
				continue;
			}
			report.popped += 1;
			let centre_cost = costs[centre];
			for n in dimensions.neighbours(centre) {
				let neighbour_cost = costs[n];
				if neighbour_cost == COST_MAX {
					continue;
				}
				let candidate =
					step_cost(dimensions.distance(n, centre), neighbour_cost, centre_cost, value);
				if candidate < self.values[n] {
					if relaxation_limit.is_some_and(|limit| report.relaxations >= limit) {
						report.degraded = true;
						break 'wavefront;
					}
					self.values[n] = candidate;
					self.heap.push(Reverse((candidate, n)));
					report.relaxations += 1;
				}
			}
		}
		self.heap.clear();
		report
	}
}
