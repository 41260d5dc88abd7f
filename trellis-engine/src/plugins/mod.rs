//! Built-in query plug-ins

mod bus;

pub use bus::{bus_number, BusPlugin};

use crate::plugin::QueryPlugin;

/// Plug-ins installed in the default registry
pub fn builtin() -> Vec<Box<dyn QueryPlugin>> {
    vec![Box::new(BusPlugin)]
}
