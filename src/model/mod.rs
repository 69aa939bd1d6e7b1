pub mod features;
pub mod majors;
