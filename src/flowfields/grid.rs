//! The [Grid] owns the three fields of a map along with the current target
//! and is the entry point for mutating and recomputing them.
//!
//! The `cost` field is authored from outside, by setting cell costs. The
//! `integration` and `flow` fields are derived from it and are only ever
//! replaced wholesale by [Grid::recompute], never patched cell by cell.
//!
//! None of the operations here block or yield, a recompute always runs to
//! completion. The grid holds no locks either so mutation and recomputation
//! must happen from one place at a time (in a Bevy app the [Grid] is a
//! resource and the scheduler enforces that).
//!

use crate::prelude::*;
use bevy::prelude::*;

/// The cost, integration and flow fields of a map and the target the flow leads to
#[derive(Resource, Clone, Debug)]
pub struct Grid {
	/// Shape of the grid
	dimensions: GridDimensions,
	/// Authored traversal cost of each cell
	cost_field: CostField,
	/// Derived cost-to-target of each cell
	integration_field: IntegrationField,
	/// Derived direction of travel of each cell
	flow_field: FlowField,
	/// Cell the flow leads to, if any
	target: Option<usize>,
	/// Ordering of the integration wavefront
	relaxation_mode: RelaxationMode,
	/// Upper bound on relaxations in a single integration pass
	relaxation_limit: Option<usize>,
	/// Weighting of neighbours when deriving flow directions
	flow_weighting: FlowWeighting,
}

impl Grid {
	/// Create a new [Grid] of open terrain with no target, fails if the
	/// dimensions are empty or `cell_size` is not a finite positive number
	pub fn new(rows: usize, columns: usize, cell_size: f32) -> Result<Self, FlowFieldError> {
		let dimensions = GridDimensions::new(rows, columns, cell_size)?;
		let size = dimensions.size();
		Ok(Grid {
			dimensions,
			cost_field: CostField::new(size),
			integration_field: IntegrationField::new(size),
			flow_field: FlowField::new(size),
			target: None,
			relaxation_mode: RelaxationMode::default(),
			relaxation_limit: None,
			flow_weighting: FlowWeighting::default(),
		})
	}
	/// Create a new [Grid] from [GridSettings]
	pub fn from_settings(settings: &GridSettings) -> Result<Self, FlowFieldError> {
		let mut grid = Grid::new(settings.rows, settings.columns, settings.cell_size)?;
		grid.relaxation_mode = settings.relaxation_mode;
		grid.relaxation_limit = settings.relaxation_limit;
		grid.flow_weighting = settings.flow_weighting;
		Ok(grid)
	}
	/// Replace the costs of every cell, the [CostField] must have one value per cell
	pub fn with_cost_field(mut self, cost_field: CostField) -> Result<Self, FlowFieldError> {
		if cost_field.len() != self.size() {
			return Err(FlowFieldError::FieldLengthMismatch {
				expected: self.size(),
				found: cost_field.len(),
			});
		}
		self.cost_field = cost_field;
		Ok(self)
	}
	/// Get the shape of the grid
	pub fn get_dimensions(&self) -> &GridDimensions {
		&self.dimensions
	}
	/// Total number of cells
	pub fn size(&self) -> usize {
		self.dimensions.size()
	}
	/// Get the current target cell
	pub fn get_target(&self) -> Option<usize> {
		self.target
	}
	/// Set or clear the target cell. Any index is accepted, but while the
	/// target is absent or outside of the grid a recompute does nothing
	pub fn set_target(&mut self, target: Option<usize>) {
		trace!("Target set to {:?}", target);
		self.target = target;
	}
	/// Set the cost of the cell at `index`, fails if the cell does not exist
	/// or `cost` is greater than [COST_MAX]
	pub fn set_cost(&mut self, index: usize, cost: u8) -> Result<(), FlowFieldError> {
		self.cost_field.set_field_cell_value(cost, index)?;
		trace!("Cost of cell {} set to {}", index, cost);
		Ok(())
	}
	/// Get the cost of the cell at `index`
	pub fn get_cost(&self, index: usize) -> Result<u8, FlowFieldError> {
		self.cost_field.get_field_cell_value(index)
	}
	/// Get the cost-to-target of the cell at `index`, [INTEGR_MAX] means it
	/// has not been reached
	pub fn get_integration(&self, index: usize) -> Result<u8, FlowFieldError> {
		self.integration_field.get_field_cell_value(index)
	}
	/// Get the direction of travel of the cell at `index`, either a unit
	/// vector or [Vec2::ZERO]
	pub fn get_flow(&self, index: usize) -> Result<Vec2, FlowFieldError> {
		self.flow_field.get_field_cell_value(index)
	}
	/// Get a reference to the [CostField]
	pub fn get_cost_field(&self) -> &CostField {
		&self.cost_field
	}
	/// Get a reference to the [IntegrationField]
	pub fn get_integration_field(&self) -> &IntegrationField {
		&self.integration_field
	}
	/// Get a reference to the [FlowField]
	pub fn get_flow_field(&self) -> &FlowField {
		&self.flow_field
	}
	/// Get the ordering of the integration wavefront
	pub fn get_relaxation_mode(&self) -> RelaxationMode {
		self.relaxation_mode
	}
	/// Set the ordering of the integration wavefront
	pub fn set_relaxation_mode(&mut self, mode: RelaxationMode) {
		self.relaxation_mode = mode;
	}
	/// Get the upper bound on relaxations in a single integration pass
	pub fn get_relaxation_limit(&self) -> Option<usize> {
		self.relaxation_limit
	}
	/// Set the upper bound on relaxations in a single integration pass
	pub fn set_relaxation_limit(&mut self, limit: Option<usize>) {
		self.relaxation_limit = limit;
	}
	/// Get the weighting of neighbours when deriving flow directions
	pub fn get_flow_weighting(&self) -> FlowWeighting {
		self.flow_weighting
	}
	/// Set the weighting of neighbours when deriving flow directions
	pub fn set_flow_weighting(&mut self, weighting: FlowWeighting) {
		self.flow_weighting = weighting;
	}
	/// Rebuild the [IntegrationField] from scratch for the current target.
	///
	/// If there is no target, or it lies outside the grid, nothing happens
	/// and [None] is returned
	pub fn compute_integration(&mut self) -> Option<IntegrationReport> {
		let Some(target) = self.target.filter(|t| self.dimensions.is_in_bounds(*t)) else {
			debug!(
				"Skipping integration, target {:?} is not a cell of the grid",
				self.target
			);
			return None;
		};
		let report = self.integration_field.calculate_field(
			target,
			&self.cost_field,
			&self.dimensions,
			self.relaxation_mode,
			self.relaxation_limit,
		)?;
		if report.is_degraded() {
			warn!(
				"Integration towards {} stopped after {} relaxations, the field is incomplete",
				target,
				report.get_relaxations()
			);
		}
		debug!(
			"Integrated towards {}, expanded {} cells with {} relaxations",
			target,
			report.get_popped(),
			report.get_relaxations()
		);
		Some(report)
	}
	/// Rebuild the [FlowField] from the current [IntegrationField]
	pub fn compute_flow(&mut self) {
		self.flow_field.calculate(
			&self.integration_field,
			&self.dimensions,
			self.flow_weighting,
		);
	}
	/// Rebuild the integration field and then the flow field. With no valid
	/// target both fields are left as they were and [None] is returned
	pub fn recompute(&mut self) -> Option<IntegrationReport> {
		let report = self.compute_integration()?;
		self.compute_flow();
		Some(report)
	}
	/// Convert a world position into a linear cell index without bounds
	/// checking, see [GridDimensions::world_to_index]
	pub fn world_to_index(&self, position: Vec2) -> i64 {
		self.dimensions.world_to_index(position)
	}
	/// Convert a world position into the index of the cell containing it,
	/// [None] if the position lies outside of the grid
	pub fn world_to_cell_index(&self, position: Vec2) -> Option<usize> {
		self.dimensions.world_to_cell_index(position)
	}
	/// Direction of travel for an actor at a world position, [None] if the
	/// position lies outside of the grid
	pub fn get_flow_at_position(&self, position: Vec2) -> Option<Vec2> {
		let index = self.world_to_cell_index(position)?;
		self.flow_field.get().get(index).copied()
	}
}
