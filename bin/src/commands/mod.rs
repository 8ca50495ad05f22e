//! CLI command implementations.

pub(crate) mod describe;
pub(crate) mod histogram;
pub(crate) mod interval;
pub(crate) mod ma;
pub(crate) mod resample;
pub(crate) mod returns;
