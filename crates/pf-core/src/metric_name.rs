//! Strongly-typed metric name.

use crate::newtype_string::define_newtype_string;

define_newtype_string! {
    /// A non-empty metric name.
    pub struct MetricName;
}
