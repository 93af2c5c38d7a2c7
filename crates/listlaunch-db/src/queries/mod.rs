pub mod directories;
pub mod packs;
pub mod plans;
pub mod sites;
