// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Filter, sort and paginate pipeline shared by every dealerdesk list screen.

pub mod debounce;
pub mod filter;
pub mod options;
pub mod page;
pub mod panel;
pub mod schema;
pub mod selection;
pub mod sort;
pub mod value;
pub mod view;

pub use debounce::*;
pub use filter::*;
pub use options::*;
pub use page::*;
pub use panel::*;
pub use schema::*;
pub use selection::*;
pub use sort::*;
pub use value::*;
pub use view::*;
