//! Resumable multi-tick tasks standing in for the animation layer: unit
//! glides, post-action pauses, and camera pans all advance one fixed tick at
//! a time and complete exactly once. Game state never waits on these; the
//! board is already updated when a task starts.

use crate::types::{TileCoord, UnitId};

/// Length of one logical tick.
pub const TICK_SECONDS: f32 = 1.0 / 60.0;

/// Glide time per planar tile of distance covered.
pub const GLIDE_SECONDS_PER_TILE: f32 = 0.1;

/// Pause after an action fires before control returns.
pub const ACTION_DELAY_SECONDS: f32 = 0.1;

/// Camera focus pan ahead of an AI unit's move.
pub const CAMERA_PAN_SECONDS: f32 = 0.25;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MotionTask {
    Glide { unit: UnitId, duration: f32 },
    ActionDelay { unit: UnitId, duration: f32 },
    CameraPan { target: TileCoord, duration: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MotionEvent {
    GlideFinished { unit: UnitId },
    ActionDelayFinished { unit: UnitId },
    CameraPanFinished { target: TileCoord },
}

/// Durations are resolved to whole ticks up front so a replayed run counts
/// down exactly the same way every time.
#[derive(Clone, Copy, Debug)]
struct ActiveTask {
    task: MotionTask,
    remaining_ticks: u32,
}

#[derive(Debug, Default)]
pub struct MotionQueue {
    active: Vec<ActiveTask>,
}

impl MotionQueue {
    pub fn push(&mut self, task: MotionTask) {
        let duration = match task {
            MotionTask::Glide { duration, .. }
            | MotionTask::ActionDelay { duration, .. }
            | MotionTask::CameraPan { duration, .. } => duration,
        };
        self.active.push(ActiveTask { task, remaining_ticks: ticks_for(duration) });
    }

    pub fn glide_duration(planar_distance: u32) -> f32 {
        planar_distance as f32 * GLIDE_SECONDS_PER_TILE
    }

    pub fn is_unit_gliding(&self, unit: UnitId) -> bool {
        self.active
            .iter()
            .any(|entry| matches!(entry.task, MotionTask::Glide { unit: moving, .. } if moving == unit))
    }

    pub fn has_action_delay(&self, unit: UnitId) -> bool {
        self.active
            .iter()
            .any(|entry| matches!(entry.task, MotionTask::ActionDelay { unit: actor, .. } if actor == unit))
    }

    pub fn is_camera_panning(&self) -> bool {
        self.active.iter().any(|entry| matches!(entry.task, MotionTask::CameraPan { .. }))
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }

    /// Advances every task by one tick. Tasks whose time elapsed are removed
    /// and reported; a zero-duration task completes on its first advance,
    /// never at push time.
    pub fn advance(&mut self) -> Vec<MotionEvent> {
        let mut finished = Vec::new();
        self.active.retain_mut(|entry| {
            entry.remaining_ticks = entry.remaining_ticks.saturating_sub(1);
            if entry.remaining_ticks > 0 {
                return true;
            }
            finished.push(match entry.task {
                MotionTask::Glide { unit, .. } => MotionEvent::GlideFinished { unit },
                MotionTask::ActionDelay { unit, .. } => MotionEvent::ActionDelayFinished { unit },
                MotionTask::CameraPan { target, .. } => MotionEvent::CameraPanFinished { target },
            });
            false
        });
        finished
    }
}

fn ticks_for(duration: f32) -> u32 {
    ((duration / TICK_SECONDS).ceil() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn unit() -> UnitId {
        let mut arena: SlotMap<UnitId, ()> = SlotMap::with_key();
        arena.insert(())
    }

    #[test]
    fn glide_completes_after_its_duration_and_exactly_once() {
        let mover = unit();
        let mut queue = MotionQueue::default();
        queue.push(MotionTask::Glide { unit: mover, duration: MotionQueue::glide_duration(2) });
        assert!(queue.is_unit_gliding(mover));

        let mut events = Vec::new();
        for _ in 0..60 {
            events.extend(queue.advance());
        }
        assert_eq!(events, vec![MotionEvent::GlideFinished { unit: mover }]);
        assert!(!queue.is_unit_gliding(mover));
        assert!(queue.is_idle());
    }

    #[test]
    fn two_tile_glide_takes_twelve_ticks() {
        let mover = unit();
        let mut queue = MotionQueue::default();
        queue.push(MotionTask::Glide { unit: mover, duration: MotionQueue::glide_duration(2) });
        for _ in 0..11 {
            assert!(queue.advance().is_empty());
        }
        assert_eq!(queue.advance(), vec![MotionEvent::GlideFinished { unit: mover }]);
    }

    #[test]
    fn zero_duration_task_completes_on_first_advance() {
        let actor = unit();
        let mut queue = MotionQueue::default();
        queue.push(MotionTask::ActionDelay { unit: actor, duration: 0.0 });
        assert!(queue.has_action_delay(actor));
        let events = queue.advance();
        assert_eq!(events, vec![MotionEvent::ActionDelayFinished { unit: actor }]);
    }

    #[test]
    fn tasks_advance_independently() {
        let mover = unit();
        let mut queue = MotionQueue::default();
        queue.push(MotionTask::Glide { unit: mover, duration: 0.5 });
        queue.push(MotionTask::CameraPan {
            target: TileCoord::new(1, 0, 1),
            duration: CAMERA_PAN_SECONDS,
        });

        let mut pan_done_at = None;
        let mut glide_done_at = None;
        for tick in 0..60 {
            for event in queue.advance() {
                match event {
                    MotionEvent::CameraPanFinished { .. } => pan_done_at = Some(tick),
                    MotionEvent::GlideFinished { .. } => glide_done_at = Some(tick),
                    MotionEvent::ActionDelayFinished { .. } => {}
                }
            }
        }
        assert!(pan_done_at.expect("pan finished") < glide_done_at.expect("glide finished"));
    }
}
