//! `use simple_flowfield::prelude::*;` to import common structures and methods
//!

#[doc(hidden)]
pub use crate::flowfields::{
	dimensions::*,
	error::*,
	fields::{cost_field::*, flow_field::*, integration_field::*, *},
	grid::*,
	utilities::*,
};

#[doc(hidden)]
pub use crate::{
	plugin::{cost_layer::*, flow_layer::*, *},
	settings::*,
};
