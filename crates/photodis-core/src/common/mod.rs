pub mod constants;
pub mod nuclide;
