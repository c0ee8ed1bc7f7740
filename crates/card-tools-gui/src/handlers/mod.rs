pub mod layout;
pub mod scan;
