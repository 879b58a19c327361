//! Meteor - the pooled item behind a meteor shower
//!
//! A meteor flies in a straight line from its spawn point. It is recycled when
//! its lifetime runs out or when it leaves the [`KillBoundary`]. Anything
//! visible (mesh, trail, sound) lives on the host side behind a
//! [`MeteorPresenter`].

use super::{Color, ItemParameters, Lifetime, PooledItem};
use crate::config::{Deserialize, Serialize};
use crate::foundation::math::Vec3;

/// Host-side representation of a meteor
///
/// The engine never touches rendering or audio; it only reports state changes.
pub trait MeteorPresenter {
    /// The meteor was checked out of the pool
    fn show(&mut self);

    /// Position, scale or colour changed
    fn update(&mut self, state: &MeteorState);

    /// The meteor was handed back to the pool
    fn hide(&mut self);

    /// The pool is destroying the meteor
    fn destroy(&mut self) {}
}

/// Region outside of which a meteor is recycled
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KillBoundary {
    /// Recycle once the meteor drops below this height
    pub floor: Option<f32>,
    /// Recycle once the meteor is further than this from its spawn point
    pub max_distance: Option<f32>,
}

impl Default for KillBoundary {
    fn default() -> Self {
        Self {
            floor: Some(0.0),
            max_distance: Some(500.0),
        }
    }
}

impl KillBoundary {
    /// A boundary that never triggers
    pub fn unbounded() -> Self {
        Self { floor: None, max_distance: None }
    }

    /// Check whether a meteor at `position`, spawned at `origin`, is out of bounds
    pub fn is_outside(&self, origin: &Vec3, position: &Vec3) -> bool {
        if self.floor.is_some_and(|floor| position.y < floor) {
            return true;
        }
        self.max_distance
            .is_some_and(|max| (position - origin).norm() > max)
    }
}

/// Physical state of a meteor
#[derive(Debug, Clone, PartialEq)]
pub struct MeteorState {
    /// Spawn position
    pub origin: Vec3,
    /// Current position
    pub position: Vec3,
    /// Unit travel direction
    pub direction: Vec3,
    /// Units per second
    pub speed: f32,
    /// Uniform scale
    pub scale: f32,
    /// Tint
    pub color: Color,
}

impl Default for MeteorState {
    fn default() -> Self {
        Self {
            origin: Vec3::zeros(),
            position: Vec3::zeros(),
            direction: Vec3::new(0.0, -1.0, 0.0),
            speed: 0.0,
            scale: 1.0,
            color: Color::WHITE,
        }
    }
}

/// A pooled meteor
pub struct Meteor {
    state: MeteorState,
    lifetime: Lifetime,
    boundary: KillBoundary,
    visible: bool,
    presenter: Option<Box<dyn MeteorPresenter>>,
}

impl std::fmt::Debug for Meteor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Meteor")
            .field("state", &self.state)
            .field("lifetime", &self.lifetime)
            .field("boundary", &self.boundary)
            .field("visible", &self.visible)
            .field("presenter", &self.presenter.is_some())
            .finish()
    }
}

impl Meteor {
    /// Create a meteor with no host-side representation
    pub fn new(boundary: KillBoundary) -> Self {
        Self {
            state: MeteorState::default(),
            lifetime: Lifetime::infinite(),
            boundary,
            visible: false,
            presenter: None,
        }
    }

    /// Create a meteor backed by a host presenter
    pub fn with_presenter(boundary: KillBoundary, presenter: Box<dyn MeteorPresenter>) -> Self {
        Self {
            presenter: Some(presenter),
            ..Self::new(boundary)
        }
    }

    /// Current physical state
    pub fn state(&self) -> &MeteorState {
        &self.state
    }

    /// Current position
    pub fn position(&self) -> Vec3 {
        self.state.position
    }

    /// Lifetime countdown
    pub fn lifetime(&self) -> &Lifetime {
        &self.lifetime
    }

    /// Kill boundary
    pub fn boundary(&self) -> &KillBoundary {
        &self.boundary
    }

    /// Whether the host has been told to show this meteor
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    fn notify_update(&mut self) {
        if let Some(presenter) = self.presenter.as_mut() {
            presenter.update(&self.state);
        }
    }
}

impl PooledItem for Meteor {
    fn configure(&mut self, params: &ItemParameters) {
        self.state = MeteorState {
            origin: params.origin,
            position: params.origin,
            direction: params.direction,
            speed: params.speed,
            scale: params.scale,
            color: params.color,
        };
        self.lifetime.restart(params.lifetime);
        self.notify_update();
    }

    fn tick(&mut self, delta_time: f32) -> bool {
        self.state.position += self.state.direction * (self.state.speed * delta_time);
        self.notify_update();

        let expired = self.lifetime.advance(delta_time);
        let outside = self.boundary.is_outside(&self.state.origin, &self.state.position);
        if outside {
            log::trace!("Meteor left its boundary at {:?}", self.state.position);
        }
        expired || outside
    }

    fn reset(&mut self) {
        self.state = MeteorState::default();
        self.lifetime = Lifetime::infinite();
    }

    fn on_acquire(&mut self) {
        self.visible = true;
        if let Some(presenter) = self.presenter.as_mut() {
            presenter.show();
        }
    }

    fn on_release(&mut self) {
        self.visible = false;
        if let Some(presenter) = self.presenter.as_mut() {
            presenter.hide();
        }
    }

    fn on_destroy(&mut self) {
        self.visible = false;
        if let Some(presenter) = self.presenter.as_mut() {
            presenter.destroy();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Show,
        Update(Vec3),
        Hide,
        Destroy,
    }

    struct RecordingPresenter(Rc<RefCell<Vec<Event>>>);

    impl MeteorPresenter for RecordingPresenter {
        fn show(&mut self) {
            self.0.borrow_mut().push(Event::Show);
        }
        fn update(&mut self, state: &MeteorState) {
            self.0.borrow_mut().push(Event::Update(state.position));
        }
        fn hide(&mut self) {
            self.0.borrow_mut().push(Event::Hide);
        }
        fn destroy(&mut self) {
            self.0.borrow_mut().push(Event::Destroy);
        }
    }

    fn params(lifetime: f32) -> ItemParameters {
        ItemParameters {
            origin: Vec3::new(0.0, 100.0, 0.0),
            direction: Vec3::new(0.0, -1.0, 0.0),
            speed: 10.0,
            scale: 2.0,
            color: Color::rgb(1.0, 0.5, 0.0),
            lifetime,
        }
    }

    #[test]
    fn test_tick_moves_along_direction() {
        let mut meteor = Meteor::new(KillBoundary::unbounded());
        meteor.configure(&params(0.0));

        assert!(!meteor.tick(0.5));
        assert_relative_eq!(meteor.position(), Vec3::new(0.0, 95.0, 0.0), epsilon = 1.0e-5);
        assert_eq!(meteor.state().scale, 2.0);
    }

    #[test]
    fn test_lifetime_expiry_boundary() {
        let mut meteor = Meteor::new(KillBoundary::unbounded());
        meteor.configure(&params(1.0));

        assert!(!meteor.tick(0.25));
        assert!(!meteor.tick(0.25));
        assert!(!meteor.tick(0.25)); // t = L - d
        assert!(meteor.tick(0.25)); // t = L
    }

    #[test]
    fn test_floor_triggers_recycle() {
        let mut meteor = Meteor::new(KillBoundary { floor: Some(90.0), max_distance: None });
        meteor.configure(&params(0.0));

        assert!(!meteor.tick(0.5)); // y = 95
        assert!(!meteor.tick(0.5)); // y = 90, not below
        assert!(meteor.tick(0.5)); // y = 85
    }

    #[test]
    fn test_max_distance_triggers_recycle() {
        let mut meteor = Meteor::new(KillBoundary { floor: None, max_distance: Some(12.0) });
        meteor.configure(&params(0.0));

        assert!(!meteor.tick(1.0));
        assert!(meteor.tick(1.0));
    }

    #[test]
    fn test_reset_clears_state() {
        let mut meteor = Meteor::new(KillBoundary::default());
        meteor.configure(&params(3.0));
        meteor.tick(1.0);

        meteor.reset();
        assert_eq!(meteor.state(), &MeteorState::default());
        assert!(meteor.lifetime().is_infinite());
    }

    #[test]
    fn test_presenter_hooks() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut meteor = Meteor::with_presenter(
            KillBoundary::unbounded(),
            Box::new(RecordingPresenter(Rc::clone(&events))),
        );

        meteor.on_acquire();
        assert!(meteor.is_visible());
        meteor.configure(&params(0.0));
        meteor.on_release();
        assert!(!meteor.is_visible());
        meteor.on_destroy();

        assert_eq!(
            *events.borrow(),
            vec![
                Event::Show,
                Event::Update(Vec3::new(0.0, 100.0, 0.0)),
                Event::Hide,
                Event::Destroy,
            ]
        );
    }
}
