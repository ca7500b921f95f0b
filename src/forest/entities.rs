use bevy::prelude::*;

/// Root of one tree.
#[derive(Component, Reflect)]
pub struct Tree;
