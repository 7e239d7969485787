//! The CostField contains an 8-bit value for every cell of the grid. The
//! values correspond to the cost of traversing that cell. A value of
//! [COST_MIN] (`0`) is the default and represents open terrain, a value of
//! [COST_MAX] (`20`) is a special case that indicates that the cell is
//! strictly forbidden from being used in a pathing calculation (effectively
//! saying there is a wall or cliff/impassable terrain there). Any value in
//! between indicates a harder cost of movement which could be from a slope
//! or marshland or others.
//!
//! An example cost field may look:
//!
//! ```text
//!  _____________________________________
//! |     |     |     |     |     |     |
//! |  0  |  0  |  0  |  0  |  0  |  0  |
//! |_____|_____|_____|_____|_____|_____|
//! |     |     |     |     |     |     |
//! |  0  |  0  | 20  | 20  | 20  |  0  |
//! |_____|_____|_____|_____|_____|_____|
//! |     |     |     |     |     |     |
//! |  0  |  5  |  5  |  0  | 20  |  0  |
//! |_____|_____|_____|_____|_____|_____|
//! |     |     |     |     |     |     |
//! |  0  |  5  |  5  |  0  |  0  |  0  |
//! |_____|_____|_____|_____|_____|_____|
//! ```
//!

use crate::flowfields::fields::index_out_of_range;
use crate::prelude::*;
use bevy::prelude::*;

/// Traversal cost of every cell in linear index order
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Reflect)]
pub struct CostField(Vec<u8>);

impl Field<u8> for CostField {
	/// Get a reference to the field array
	fn get(&self) -> &[u8] {
		&self.0
	}
	/// Retrieve a field cell value
	fn get_field_cell_value(&self, index: usize) -> Result<u8, FlowFieldError> {
		self.0
			.get(index)
			.copied()
			.ok_or_else(|| index_out_of_range(index, self.0.len()))
	}
	/// Set a field cell to a value, costs above [COST_MAX] are rejected
	fn set_field_cell_value(&mut self, value: u8, index: usize) -> Result<(), FlowFieldError> {
		if value > COST_MAX {
			return Err(FlowFieldError::CostOutOfRange { cost: value });
		}
		let size = self.0.len();
		let cell = self
			.0
			.get_mut(index)
			.ok_or_else(|| index_out_of_range(index, size))?;
		*cell = value;
		Ok(())
	}
}

impl CostField {
	/// Create a new [CostField] of `size` open cells
	pub fn new(size: usize) -> Self {
		CostField(vec![COST_MIN; size])
	}
	/// Create a [CostField] from one cost per cell of `dimensions`, in linear index order
	pub fn from_values(dimensions: &GridDimensions, values: Vec<u8>) -> Result<Self, FlowFieldError> {
		if values.len() != dimensions.size() {
			return Err(FlowFieldError::FieldLengthMismatch {
				expected: dimensions.size(),
				found: values.len(),
			});
		}
		if let Some(cost) = values.iter().copied().find(|cost| *cost > COST_MAX) {
			return Err(FlowFieldError::CostOutOfRange { cost });
		}
		Ok(CostField(values))
	}
	/// Number of cells in the field
	pub fn len(&self) -> usize {
		self.0.len()
	}
	/// Whether the field has no cells
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
	/// Whether the cell at `index` is a wall. Out of range indices are not
	/// walls, they are not cells at all
	pub fn is_impassable(&self, index: usize) -> bool {
		self.0.get(index) == Some(&COST_MAX)
	}
	/// From a `ron` file containing a flat list of costs generate the [CostField]
	#[cfg(feature = "ron")]
	pub fn from_ron(path: &str, dimensions: &GridDimensions) -> Result<Self, FlowFieldError> {
		let file = std::fs::File::open(path).map_err(|e| FlowFieldError::Load {
			path: path.to_string(),
			reason: e.to_string(),
		})?;
		let values: Vec<u8> = ron::de::from_reader(file).map_err(|e| FlowFieldError::Load {
			path: path.to_string(),
			reason: e.to_string(),
		})?;
		CostField::from_values(dimensions, values)
	}
	/// From a `csv` file generate the [CostField], each record of the file
	/// is a row of the grid
	#[cfg(feature = "csv")]
	pub fn from_csv(path: &str, dimensions: &GridDimensions) -> Result<Self, FlowFieldError> {
		let load_err = |reason: String| FlowFieldError::Load {
			path: path.to_string(),
			reason,
		};
		let data = std::fs::File::open(path).map_err(|e| load_err(e.to_string()))?;
		let mut rdr = csv::ReaderBuilder::new()
			.has_headers(false)
			.trim(csv::Trim::All)
			.from_reader(data);
		let mut values = Vec::with_capacity(dimensions.size());
		for (row, record) in rdr.records().enumerate() {
			let record = record.map_err(|e| load_err(e.to_string()))?;
			if record.len() != dimensions.get_columns() {
				return Err(load_err(format!(
					"row {} has {} values, expected {}",
					row,
					record.len(),
					dimensions.get_columns()
				)));
			}
			for value in record.iter() {
				let cost: u8 = value
					.parse()
					.map_err(|_| load_err(format!("row {} has non-u8 cost `{}`", row, value)))?;
				values.push(cost);
			}
		}
		CostField::from_values(dimensions, values)
	}
	/// Create a [CostField] from a greyscale image where each pixel
	/// represents the cost of a cell. Black pixels become walls
	/// ([COST_MAX]), white pixels become open terrain ([COST_MIN]) and
	/// shades of grey scale linearly in between
	#[cfg(feature = "heightmap")]
	pub fn from_heightmap(path: &str, dimensions: &GridDimensions) -> Result<Self, FlowFieldError> {
		use photon_rs::native::open_image;
		let img = open_image(path).map_err(|e| FlowFieldError::Load {
			path: path.to_string(),
			reason: format!("{:?}", e),
		})?;
		let img_width = img.get_width() as usize;
		let img_height = img.get_height() as usize;
		if img_width != dimensions.get_columns() || img_height != dimensions.get_rows() {
			return Err(FlowFieldError::Load {
				path: path.to_string(),
				reason: format!(
					"heightmap is {}x{} pixels, expected {}x{}",
					img_width,
					img_height,
					dimensions.get_columns(),
					dimensions.get_rows()
				),
			});
		}
		let raw_pixels = img.get_raw_pixels();
		// raw pixels are arranged from the top left of the image and come in sets of either 3 or 4 (if alpha channel is inlcuded)
		let chunk_size = if raw_pixels.len() == img_width * img_height * 4 {
			4
		} else {
			3
		};
		let values = raw_pixels
			.chunks(chunk_size)
			.map(|px| {
				let colour_avg = (px[0] as f32 + px[1] as f32 + px[2] as f32) / 3.0;
				let darkness = (255.0 - colour_avg) / 255.0;
				(darkness * COST_MAX as f32).round().clamp(0.0, COST_MAX as f32) as u8
			})
			.collect();
		CostField::from_values(dimensions, values)
	}
}
