//! Logic for moving the target of the [Grid] and recomputing its integration
//! and flow fields.
//!
//! Changes are coalesced, any number of cost and target updates within a
//! frame lead to at most one recompute. Recomputes are further throttled by
//! the [RecomputeSchedule] interval so a map which changes every frame is not
//! rebuilt every frame
//!

use std::time::Duration;

use crate::prelude::*;
use bevy::prelude::*;

/// Used to move (or clear) the target the flow of the [Grid] leads to
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventSetTarget(Option<usize>);

impl EventSetTarget {
	/// Create a new instance of [EventSetTarget]
	pub fn new(target: Option<usize>) -> Self {
		EventSetTarget(target)
	}
	/// Get the requested target
	pub fn get_target(&self) -> Option<usize> {
		self.0
	}
}

/// Emitted after the fields of the [Grid] have been rebuilt
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventFieldsRecomputed {
	/// The target the fields lead to
	target: usize,
	/// Statistics of the integration pass
	report: IntegrationReport,
}

impl EventFieldsRecomputed {
	/// Create a new instance of [EventFieldsRecomputed]
	pub fn new(target: usize, report: IntegrationReport) -> Self {
		EventFieldsRecomputed { target, report }
	}
	/// Get the target the fields lead to
	pub fn get_target(&self) -> usize {
		self.target
	}
	/// Get the statistics of the integration pass
	pub fn get_report(&self) -> &IntegrationReport {
		&self.report
	}
}

/// Tracks whether the [Grid] has changed since it was last recomputed and
/// when that was
#[derive(Resource, Clone, Debug, Default)]
pub struct RecomputeSchedule {
	/// Minimum time between two recomputes
	interval: Duration,
	/// Elapsed app time of the last recompute
	last_recompute: Option<Duration>,
	/// Whether the grid has changed since the last recompute
	dirty: bool,
}

impl RecomputeSchedule {
	/// Create a clean schedule which has never recomputed
	pub fn new(interval: Duration) -> Self {
		RecomputeSchedule {
			interval,
			last_recompute: None,
			dirty: false,
		}
	}
	/// Get the minimum time between two recomputes
	pub fn get_interval(&self) -> Duration {
		self.interval
	}
	/// Get the elapsed app time of the last recompute
	pub fn get_last_recompute(&self) -> Option<Duration> {
		self.last_recompute
	}
	/// Whether the grid has changed since the last recompute
	pub fn is_dirty(&self) -> bool {
		self.dirty
	}
	/// Request a recompute. Call this after mutating the [Grid] resource
	/// directly rather than through events
	pub fn mark_dirty(&mut self) {
		self.dirty = true;
	}
	/// Whether a recompute is allowed at elapsed app time `now`
	pub fn is_due(&self, now: Duration) -> bool {
		match self.last_recompute {
			Some(last) => now.saturating_sub(last) >= self.interval,
			None => true,
		}
	}
	/// Record a recompute at elapsed app time `now`
	fn mark_clean(&mut self, now: Duration) {
		self.dirty = false;
		self.last_recompute = Some(now);
	}
}

/// Read [EventSetTarget] and move the target of the [Grid]. Only the last
/// event of a frame matters
pub fn process_target_updates(
	mut events: EventReader<EventSetTarget>,
	mut grid: ResMut<Grid>,
	mut schedule: ResMut<RecomputeSchedule>,
) {
	if let Some(event) = events.read().last() {
		let target = event.get_target();
		if let Some(index) = target {
			if !grid.get_dimensions().is_in_bounds(index) {
				warn!(
					"Target {} is outside of a grid of {} cells, no flow will be calculated",
					index,
					grid.size()
				);
			}
		}
		if grid.get_target() != target {
			grid.set_target(target);
			schedule.mark_dirty();
		}
	}
}

/// When the [Grid] has changed and the [RecomputeSchedule] interval has
/// passed rebuild its integration and flow fields
pub fn recompute_fields(
	mut grid: ResMut<Grid>,
	mut schedule: ResMut<RecomputeSchedule>,
	time: Res<Time>,
	mut event_recomputed: EventWriter<EventFieldsRecomputed>,
) {
	if !schedule.is_dirty() {
		return;
	}
	let now = time.elapsed();
	if !schedule.is_due(now) {
		return;
	}
	schedule.mark_clean(now);
	if let Some(report) = grid.recompute() {
		if let Some(target) = grid.get_target() {
			event_recomputed.write(EventFieldsRecomputed::new(target, report));
		}
	}
}
