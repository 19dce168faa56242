//! localdev - Deploy services, tools and CI/CD config to a local Minikube cluster.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── dispatch      # Arguments -> ordered steps
//! │   └── output        # Terminal output helpers
//! └── core/             # Core library components
//!     ├── settings      # Defaults, .localdev.toml, environment
//!     ├── secrets       # Secret Manager accessor
//!     ├── pipeline      # Jenkinsfile setting extraction
//!     ├── process       # Subprocess execution
//!     ├── plan          # Typed steps and failure policies
//!     ├── build_test    # Build-test workflow
//!     └── cleanup       # Build-test artifact cleanup
//! ```
//!
//! Every step blocks until its child exits; nothing runs concurrently.

pub mod cli;
pub mod core;
pub mod error;
