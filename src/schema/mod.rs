pub mod category;
pub mod options;
pub mod pack;
