//! Configuration of a [crate::prelude::Grid] and of how often the plugin
//! recomputes it
//!

use bevy::prelude::*;
use std::time::Duration;

use crate::prelude::*;

/// Everything needed to create a [Grid] and drive it from the
/// [crate::prelude::FlowFieldPlugin]. With the `ron` feature it can be read
/// from disk, any field missing from the file keeps its default:
///
/// ```text
/// (
/// 	rows: 40,
/// 	columns: 40,
/// 	cell_size: 20.0,
/// 	recompute_interval_ms: 100,
/// 	relaxation_mode: Fifo,
/// 	relaxation_limit: None,
/// 	flow_weighting: Relative,
/// )
/// ```
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, PartialEq, Reflect)]
pub struct GridSettings {
	/// Number of cells along the `x` axis
	pub rows: usize,
	/// Number of cells along the `y` axis
	pub columns: usize,
	/// World units spanned by the edge of a cell
	pub cell_size: f32,
	/// Minimum time between two recomputes of a dirty grid, `0` recomputes
	/// on every update the grid has changed
	pub recompute_interval_ms: u64,
	/// Ordering of the integration wavefront
	pub relaxation_mode: RelaxationMode,
	/// Upper bound on relaxations in a single integration pass, [None] runs to completion
	pub relaxation_limit: Option<usize>,
	/// Weighting of neighbours when deriving flow directions
	pub flow_weighting: FlowWeighting,
}

impl Default for GridSettings {
	fn default() -> Self {
		GridSettings {
			rows: 40,
			columns: 40,
			cell_size: 20.0,
			recompute_interval_ms: 100,
			relaxation_mode: RelaxationMode::default(),
			relaxation_limit: None,
			flow_weighting: FlowWeighting::default(),
		}
	}
}

impl GridSettings {
	/// Minimum time between two recomputes
	pub fn get_recompute_interval(&self) -> Duration {
		Duration::from_millis(self.recompute_interval_ms)
	}
	/// From a `ron` file generate the [GridSettings]
	#[cfg(feature = "ron")]
	pub fn from_ron(path: &str) -> Result<Self, FlowFieldError> {
		let file = std::fs::File::open(path).map_err(|e| FlowFieldError::Load {
			path: path.to_string(),
			reason: e.to_string(),
		})?;
		ron::de::from_reader(file).map_err(|e| FlowFieldError::Load {
			path: path.to_string(),
			reason: e.to_string(),
		})
	}
}
