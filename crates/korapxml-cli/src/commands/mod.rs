pub mod export;
pub mod foundries;
