pub mod cli;
pub mod error;
pub mod git;
pub mod heat;
pub mod model;
pub mod scan;
pub mod store;
pub mod util;
