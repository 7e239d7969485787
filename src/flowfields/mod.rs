//! Flowfields are a means of handling pathfinding for a crowd of actors.
//! Rather than searching a path for every actor, a single calculation from
//! the target outwards tells every cell of the map which way to travel.
//!
//! [jdxdev](https://www.jdxdev.com/blog/2020/05/03/flowfields/)
//!
//! [leifnode](https://leifnode.com/2013/12/flow-field-pathfinding/)
//!
//! The map is a single rectangular [grid::Grid] of `rows x columns` square
//! cells. Cells are indexed linearly from the corner at the world origin,
//! world `x` stepping down the rows and `y` running along the columns, so a
//! position lands in cell `columns * floor(x / cell_size) + floor(y / cell_size)`:
//!
//! ```text
//!   y ->
//! x  ________________________
//! | |     |     |     |     |
//! v |  0  |  1  |  2  |  3  |
//!   |_____|_____|_____|_____|
//!   |     |     |     |     |
//!   |  4  |  5  |  6  |  7  |
//!   |_____|_____|_____|_____|
//!   |     |     |     |     |
//!   |  8  |  9  | 10  | 11  |
//!   |_____|_____|_____|_____|
//! ```
//!
//! Definitions:
//!
//! * Cost field - 8-bit field where [utilities::COST_MAX] represents
//! impassable terrain and anything lower is the cost of traversing that
//! cell, [utilities::COST_MIN] being open terrain
//! * Integration field - uses the cost field as input and stores the
//! calculated cost-to-target of each cell
//! * Flow field - a direction for every cell derived from the integration
//! field, actors read the direction of the cell they stand in and follow it
//!

pub mod dimensions;
pub mod error;
pub mod fields;
pub mod grid;
pub mod utilities;
