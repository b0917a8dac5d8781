pub mod check;
pub mod classify;
pub mod features;
pub mod model;
