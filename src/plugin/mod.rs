//! Defines the Bevy [Plugin] for keeping a [Grid] up to date
//!

use crate::prelude::*;
use bevy::prelude::*;

pub mod cost_layer;
pub mod flow_layer;

/// Systems reading requested changes run before the grid is recomputed
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum OrderingSet {
	/// Apply cost and target changes to the [Grid]
	Input,
	/// Recompute the fields of the [Grid]
	Calculate,
}

/// Inserts a [Grid] built from [GridSettings] (unless one has already been
/// inserted, for instance with a [CostField] loaded from disk) and recomputes
/// it whenever it has changed, no more often than the configured interval
#[derive(Default)]
pub struct FlowFieldPlugin {
	/// Shape of the grid and the recompute behaviour
	pub settings: GridSettings,
}

impl FlowFieldPlugin {
	/// Create the plugin from [GridSettings]
	pub fn new(settings: GridSettings) -> Self {
		FlowFieldPlugin { settings }
	}
}

impl Plugin for FlowFieldPlugin {
	#[cfg(not(tarpaulin_include))]
	fn build(&self, app: &mut App) {
		if !app.world().contains_resource::<Grid>() {
			let grid = Grid::from_settings(&self.settings)
				.unwrap_or_else(|e| panic!("Cannot build grid from settings, {}", e));
			app.insert_resource(grid);
		}
		app.register_type::<Ordinal>()
			.register_type::<GridDimensions>()
			.register_type::<GridSettings>()
			.register_type::<CostField>()
			.register_type::<FlowField>()
			.register_type::<FieldCell>()
			.register_type::<RelaxationMode>()
			.register_type::<FlowWeighting>()
			.insert_resource(flow_layer::RecomputeSchedule::new(
				self.settings.get_recompute_interval(),
			))
			.add_event::<cost_layer::EventUpdateCostCell>()
			.add_event::<flow_layer::EventSetTarget>()
			.add_event::<flow_layer::EventFieldsRecomputed>()
			.configure_sets(Update, (OrderingSet::Input, OrderingSet::Calculate).chain())
			.add_systems(
				Update,
				(
					(
						cost_layer::process_cost_updates,
						flow_layer::process_target_updates,
					)
						.chain()
						.in_set(OrderingSet::Input),
					flow_layer::recompute_fields.in_set(OrderingSet::Calculate),
				),
			);
	}
}
