use bevy_ecs::{bundle::Bundle, component::Component, resource::Resource};
use glam::Vec2;
use rand::{rngs::SmallRng, SeedableRng};

use crate::constants::{GHOST_RADIUS, GHOST_SPEED, LIVES, PLAYER_RADIUS, PLAYER_SPEED};
use crate::map::direction::Direction;
use crate::map::rect::Rect;

/// A tag component for entities that are controlled by the player.
#[derive(Default, Component)]
pub struct PlayerControlled;

/// A ghost, identified by its spawn order.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ghost {
    pub index: usize,
}

/// A tag component for collectible pellets.
#[derive(Default, Component)]
pub struct Pellet;

/// Center of an entity, in board pixels.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

/// Where an actor goes back to after the player loses a life.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint(pub Vec2);

/// Current heading and per-tick speed of a moving entity.
///
/// A direction of `None` means the entity is standing still.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Velocity {
    pub direction: Option<Direction>,
    pub speed: f32,
}

/// The direction the player last asked for.
///
/// It stays buffered after being taken, so the player keeps turning into it at each
/// tile center until another direction is requested.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BufferedDirection(pub Option<Direction>);

/// The square collision box of an actor, derived from its radius.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub radius: f32,
}

impl Collider {
    /// Side length of the collision box.
    pub fn size(&self) -> f32 {
        self.radius * 2.0 - 2.0
    }

    /// The collision box when centered on `center`.
    pub fn rect(&self, center: Vec2) -> Rect {
        Rect::from_center(center, self.size())
    }
}

#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: PlayerControlled,
    pub position: Position,
    pub spawn: SpawnPoint,
    pub velocity: Velocity,
    pub buffered_direction: BufferedDirection,
    pub collider: Collider,
}

impl PlayerBundle {
    pub fn new(start: Vec2) -> Self {
        Self {
            player: PlayerControlled,
            position: Position(start),
            spawn: SpawnPoint(start),
            velocity: Velocity {
                direction: None,
                speed: PLAYER_SPEED,
            },
            buffered_direction: BufferedDirection::default(),
            collider: Collider { radius: PLAYER_RADIUS },
        }
    }
}

#[derive(Bundle)]
pub struct GhostBundle {
    pub ghost: Ghost,
    pub position: Position,
    pub spawn: SpawnPoint,
    pub velocity: Velocity,
    pub collider: Collider,
}

impl GhostBundle {
    pub fn new(index: usize, start: Vec2, direction: Direction) -> Self {
        Self {
            ghost: Ghost { index },
            position: Position(start),
            spawn: SpawnPoint(start),
            velocity: Velocity {
                direction: Some(direction),
                speed: GHOST_SPEED,
            },
            collider: Collider { radius: GHOST_RADIUS },
        }
    }
}

#[derive(Bundle)]
pub struct PelletBundle {
    pub pellet: Pellet,
    pub position: Position,
}

impl PelletBundle {
    pub fn new(center: Vec2) -> Self {
        Self {
            pellet: Pellet,
            position: Position(center),
        }
    }
}

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScoreResource(pub u32);

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerLives(pub u8);

impl Default for PlayerLives {
    fn default() -> Self {
        Self(LIVES)
    }
}

/// Pellets left on the board.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PelletCount(pub usize);

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GlobalState {
    pub exit: bool,
    /// Set when a restart was requested; whoever owns the game replaces it after the tick.
    pub restart: bool,
}

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PauseState(pub bool);

/// The random source for ghost behavior, seedable for reproducible runs.
#[derive(Resource, Debug, Clone)]
pub struct GameRng(pub SmallRng);

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}
