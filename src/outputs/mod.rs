//! Output generation for analysis reports.
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! └── 2025-05-06/
//!     ├── tesla.json
//!     └── att-inc.json
//! ```

pub mod json;
