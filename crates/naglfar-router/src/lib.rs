//! # Naglfar Router
//!
//! The matching layer of the Naglfar navigation engine:
//! - Path normalization (`/path/` → `/path`, root preserved)
//! - Query string decoding with number/boolean coercion and comma lists
//! - Route templates: literals, `:param`, `*splat` and `( optional )` groups
//! - An ordered registry where *every* matching route applies, plus exact-path redirects
//!
//! The registry is generic over its action type; dispatching actions is the
//! job of the `naglfar` crate.
//!
//! ## Example
//!
//! ```
//! use naglfar_router::{normalize_path, PatternRegistry};
//!
//! let mut registry = PatternRegistry::new();
//! registry.register_route("/a/:animal", vec!["ANIMAL_SELECTED"]).unwrap();
//! registry.register_redirect("/zoo", "/a/lion");
//!
//! let path = normalize_path("/a/tiger/");
//! let matches = registry.find_matches(&path);
//! assert_eq!(matches[0].params.get("animal"), Some(&"tiger".to_string()));
//! assert_eq!(registry.redirect_for("/zoo"), Some("/a/lion"));
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod error;
pub mod path;
pub mod query;
pub mod registry;
pub mod route;

pub use error::RouterError;
pub use path::{normalize_path, query_fragment, split_location};
pub use query::{parse_query, Query, QueryValue};
pub use registry::{PatternRegistry, RouteEntry, RouteMatch};
pub use route::{Params, PatternToken, RoutePattern};
