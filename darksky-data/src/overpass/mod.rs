//! Road, car park and park lookup backed by the Overpass API.
//!
//! [`OverpassFeatureLookup`] implements [`darksky_core::FeatureLookup`]. Each
//! query asks Overpass for car parks, drivable roads and parks within the
//! requested radius and returns their centre points.
//!
//! # Example
//!
//! ```no_run
//! use darksky_core::FeatureLookup;
//! use darksky_data::overpass::{OverpassConfig, OverpassFeatureLookup};
//! use geo::Coord;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let lookup = OverpassFeatureLookup::with_config(
//!     OverpassConfig::new("https://overpass-api.de/api").with_user_agent("my-app/1.0"),
//! )?;
//! let features = lookup.query(Coord { x: 11.582, y: 48.1351 }, 3000.0).await?;
//! println!("{} features nearby", features.len());
//! # Ok(())
//! # }
//! ```

mod provider;
mod query;
mod response;

pub use provider::{DEFAULT_OVERPASS_URL, OverpassConfig, OverpassFeatureLookup};
