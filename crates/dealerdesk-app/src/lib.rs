// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod assignment;
pub mod cascade;
pub mod identity;
pub mod ids;
pub mod model;
pub mod screens;
pub mod state;

pub use assignment::*;
pub use cascade::*;
pub use identity::*;
pub use ids::*;
pub use model::*;
pub use screens::*;
pub use state::*;
