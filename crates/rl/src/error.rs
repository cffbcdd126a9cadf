use physics::{ColliderHandle, PhysicsError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnvError {
    #[error("collider {0:?} is registered to more than one ice patch")]
    DuplicateCollider(ColliderHandle),
    #[error("ice patch node `{0}` has no collider")]
    PatchWithoutCollider(String),
    #[error("no ice patch owns collider {0:?}")]
    UnknownCollider(ColliderHandle),
    #[error("action must have {expected} components, got {got}")]
    BadAction { expected: usize, got: usize },
    #[error("scene setup failed")]
    Scene(#[source] anyhow::Error),
    #[error(transparent)]
    Physics(#[from] PhysicsError),
    #[error("config field `{field}` must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("reading config: {0}")]
    Io(#[from] std::io::Error),
}
