//! A scripted editing session.
//!
//! Builds a small set, marks it saved, then edits it the way a user would:
//! a chair drag recorded as one group, a sky change and a keyframe retime.
//! Finally walks the history back and forth and checks that playback blocks
//! traversal.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rewind_core::{History, HistoryConfig, Submit, Traversal};
use rewind_scene::{
    AddEntity, EntityId, FieldValue, Scene, SceneResult, SetField, SetSky, SkySettings, move_keyframes,
};

use crate::config::SessionConfig;

/// Summary of a finished session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    pub live_entities: usize,
    pub undo_count: usize,
    pub redo_count: usize,
    pub dirty: bool,
    pub chair_x: Option<FieldValue>,
    /// Dirty-state notifications received.
    pub notifications: usize,
    /// Whether undo was refused while playback ran.
    pub blocked_during_playback: bool,
}

/// A scene, its history and the handles the script edits.
pub struct Session {
    scene: Scene,
    history: History<Scene>,
    chair: EntityId,
    notifications: Arc<AtomicUsize>,
}

impl Session {
    /// Builds `World/Props/Chair`, then marks the history clean as if the
    /// scene had just been saved.
    pub fn start(config: HistoryConfig) -> SceneResult<Self> {
        let mut scene = Scene::new();
        let mut history = History::with_config(config);

        let notifications = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&notifications);
        let mut last = false;
        history.on_dirty_changed(move |dirty| {
            counter.fetch_add(1, Ordering::Relaxed);
            if dirty != last {
                last = dirty;
                log::info!("Scene is now {}", if dirty { "modified" } else { "saved" });
            }
        });

        let world = AddEntity::apply(&mut scene, "World", None)?;
        let world_id = world.entity();
        world.submit(&mut history);

        let props = AddEntity::apply(&mut scene, "Props", Some(world_id))?;
        let props_id = props.entity();
        props.submit(&mut history);

        let chair = AddEntity::apply(&mut scene, "Chair", Some(props_id))?;
        let chair_id = chair.entity();
        chair.submit(&mut history);
        SetField::apply(&mut scene, "World/Props/Chair/Transform/PositionX", 0.0_f32)?.submit(&mut history);

        history.set_clean(false);

        Ok(Self {
            scene,
            history,
            chair: chair_id,
            notifications,
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn history(&self) -> &History<Scene> {
        &self.history
    }

    /// Moves the chair along X over `frames` pointer samples, recorded as a
    /// single "Drag Chair" entry.
    pub fn drag_chair(&mut self, frames: u32) -> SceneResult<()> {
        if frames == 0 {
            return Ok(());
        }
        let mut drag = self.history.group("Drag Chair");
        for i in 1..=frames {
            let x = i as f32 * 0.25;
            SetField::apply_to(&mut self.scene, self.chair, "Transform/PositionX", x)?.submit(&mut drag);
        }
        drag.commit();
        Ok(())
    }

    pub fn change_sky(&mut self) {
        let dusk = SkySettings::default()
            .with_top([0.05, 0.07, 0.2])
            .with_middle([0.8, 0.45, 0.3]);
        SetSky::apply(&mut self.scene, dusk).submit(&mut self.history);
    }

    /// Imports a short animation for the chair and shifts its second key
    /// from frame 24 to `new_frame`. Returns the number of curves moved.
    pub fn retime(&mut self, new_frame: i32) -> SceneResult<usize> {
        self.scene.insert_key(self.chair, "position.x", 0, 0.0)?;
        self.scene.insert_key(self.chair, "position.x", 24, 3.0)?;
        self.scene.insert_key(self.chair, "rotation.y", 24, 90.0)?;
        move_keyframes(&mut self.history, &mut self.scene, self.chair, 24, new_frame)
    }

    /// Undoes `steps` entries and redoes them again, logging each label.
    pub fn undo_redo(&mut self, steps: usize) {
        for _ in 0..steps {
            let label = self.history.undo_labels().next().map(str::to_owned);
            if self.history.undo(&mut self.scene) != Traversal::Applied {
                break;
            }
            log::info!("Undo: {}", label.as_deref().unwrap_or("?"));
        }
        for _ in 0..steps {
            let label = self.history.redo_labels().next().map(str::to_owned);
            if self.history.redo(&mut self.scene) != Traversal::Applied {
                break;
            }
            log::info!("Redo: {}", label.as_deref().unwrap_or("?"));
        }
    }

    /// Starts playback, attempts an undo, stops playback.
    ///
    /// Returns `true` if the undo was refused.
    pub fn undo_during_playback(&mut self) -> bool {
        self.scene.playback_mut().play();
        let outcome = self.history.undo(&mut self.scene);
        self.scene.playback_mut().stop();
        log::info!("Undo during playback: {outcome:?}");
        outcome == Traversal::PlaybackActive
    }

    pub fn report(&self, blocked_during_playback: bool) -> SessionReport {
        SessionReport {
            live_entities: self.scene.live_count(),
            undo_count: self.history.undo_count(),
            redo_count: self.history.redo_count(),
            dirty: self.history.is_dirty(),
            chair_x: self.scene.field(self.chair, "Transform", "PositionX").cloned(),
            notifications: self.notifications.load(Ordering::Relaxed),
            blocked_during_playback,
        }
    }
}

/// Runs the whole script with `config`.
pub fn run(config: &SessionConfig) -> SceneResult<SessionReport> {
    let mut session = Session::start(config.history.clone())?;
    session.drag_chair(config.session.drag_frames)?;
    session.change_sky();
    let moved = session.retime(36)?;
    log::info!("Retimed {moved} curve(s)");
    session.undo_redo(3);
    let blocked = session.undo_during_playback();
    Ok(session.report(blocked))
}
