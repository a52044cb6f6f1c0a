//! Manhattan routing of port bundles.
//!
//! The entry points are [`BundleRouter::route_direct`], [`BundleRouter::route_indirect`]
//! and the dispatching [`BundleRouter::route_bundle`], along with free functions of the
//! same names that use the default routers and [`RouterConfig`].
//!
//! ```
//! use subroute::{route_bundle, Port, RoutingRequest};
//!
//! let ports1 = vec![Port::new("a", (0., 0.), 0.), Port::new("b", (0., 10.), 0.)];
//! let ports2 = vec![Port::new("c", (100., 0.), 180.), Port::new("d", (100., 10.), 180.)];
//! let request = RoutingRequest::builder()
//!     .ports1(ports1)
//!     .ports2(ports2)
//!     .build()
//!     .unwrap();
//! let routes = route_bundle(&request).unwrap();
//! assert_eq!(routes.len(), 2);
//! ```

pub mod config;
pub mod error;
pub mod port;
pub mod routing;
pub mod waypath;

pub(crate) mod log;

pub use waygeom;

pub use config::RouterConfig;
pub use error::{ErrorContext, ErrorSource, Result, RoutingError};
pub use port::{Port, PortId};
pub use routing::bundle::{
    min_spacing, route_bundle, route_direct, route_indirect, validate_connections, BundleResult,
    BundleRouter, RoutingRequest,
};
pub use waypath::{ConnectionAssembler, Waypath};
