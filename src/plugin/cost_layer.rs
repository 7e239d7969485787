//! Logic for handling changes to the [CostField] of the [Grid]
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Used to update the cost of a cell of the [Grid]
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventUpdateCostCell {
	/// Linear index of the cell to update
	index: usize,
	/// The value the cell should be assigned
	cost: u8,
}

impl EventUpdateCostCell {
	/// Create a new instance of [EventUpdateCostCell]
	pub fn new(index: usize, cost: u8) -> Self {
		EventUpdateCostCell { index, cost }
	}
	/// Get the index of the cell to update
	pub fn get_index(&self) -> usize {
		self.index
	}
	/// Get the cost the cell should be assigned
	pub fn get_cost(&self) -> u8 {
		self.cost
	}
}

/// Read [EventUpdateCostCell] and update the values within the [CostField].
/// Invalid updates are logged and dropped, any applied update marks the grid
/// for recomputation
pub fn process_cost_updates(
	mut events: EventReader<EventUpdateCostCell>,
	mut grid: ResMut<Grid>,
	mut schedule: ResMut<RecomputeSchedule>,
) {
	for event in events.read() {
		match grid.set_cost(event.get_index(), event.get_cost()) {
			Ok(()) => schedule.mark_dirty(),
			Err(e) => warn!("Dropping cost update, {}", e),
		}
	}
}
