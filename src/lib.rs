//! Group the images of a high-content screen into one file pattern per field
//!
//! The images of a plate sit in a single directory, one file per channel,
//! field and timepoint. [`group_files`] collects them by field and writes a
//! [`file_pattern`] pattern for each, so that importers can treat every
//! field as a single multi-dimensional image.
//!
//! ```no_run
//! use idr_patterns::{write_patterns, GroupConfig};
//!
//! let config = GroupConfig::new("/data/idr0026/plate1").with_out_dir("patterns");
//! for path in write_patterns(&config).unwrap() {
//!     println!("{}", path.display());
//! }
//! ```

pub mod config;
pub mod convention;
pub mod error;
pub mod grouping;
pub mod logging;

pub use config::GroupConfig;
pub use convention::{Convention, ImageName};
pub use error::{GroupError, Result};
pub use grouping::{field_pattern, group_files, write_patterns};
pub use logging::{init_logging, LogLevel};
