//! Network map loading.
//!
//! Builds a [`Network`](crate::models::Network) from the plain-text map
//! format: a `stations:` section of `name,x,y` lines and a `connections:`
//! section of `name-name` lines.

mod map_file;

pub use map_file::{load_network, parse_network, MapError};
