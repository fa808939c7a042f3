// Copyright 2026 the Formwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Formwork Value: the shared form value tree and dotted-path access.
//!
//! A form's state is a single [`Value`] tree owned by the form-state
//! container. Every field addresses its slot in that tree through a dotted
//! [`Path`] (`"profile.address.0.city"`), the way host form libraries key
//! controllers by path strings.
//!
//! [`Value`] is JSON-shaped with one extension: [`Value::File`] carries an
//! opaque [`FileHandle`] so that file widgets can emit selected native files
//! through the same tree as every other field. Contents of a file are never
//! the tree's concern; a handle is name, size, and media type plus an
//! identity.
//!
//! ## Minimal example
//!
//! ```rust
//! use formwork_value::{Path, Value};
//!
//! let mut tree = Value::object();
//! let path: Path = "user.tags.0".parse().unwrap();
//! path.set(&mut tree, Value::text("admin")).unwrap();
//!
//! assert_eq!(path.get(&tree), Some(&Value::text("admin")));
//! assert_eq!("user.missing".parse::<Path>().unwrap().get(&tree), None);
//! ```

mod file;
mod path;
mod value;

pub use file::FileHandle;
pub use path::{Path, PathError, Segment};
pub use value::{Map, Value};
