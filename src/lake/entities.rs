use bevy::prelude::*;

/// The animated water plane. Holds its mesh so the wave system can rewrite it.
#[derive(Component, Reflect)]
pub struct LakeSurface {
    /// Handle to the mutable surface mesh.
    pub mesh: Handle<Mesh>,
}
