//! Binds a [`micro_route::RouteList`] into a dispatch table.
//!
//! Paths declared with `:name` segments are converted to the `{name}` syntax of
//! [`matchit`]. Routes sharing a path are tried in registration order, the first one whose
//! verb accepts the request method wins. Matched parameters are handed to handlers as
//! [`PathParams`] in the request extensions.

mod error;
mod params;
mod table;

pub use error::BindError;
pub use error::DispatchError;
pub use params::PathParams;
pub use table::Binding;
pub use table::RouteMatch;
pub use table::RouteTable;
pub use table::RouteTableBuilder;
