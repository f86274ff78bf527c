//! 各向导步骤的页面

pub mod nameservers;
pub mod permissions;
pub mod root_zone;
pub mod setup;
pub mod summary;
