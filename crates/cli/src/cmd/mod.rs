pub mod count;
pub mod doctor;
pub mod expand;
pub mod interpolate;
pub mod refs;
pub mod session;
