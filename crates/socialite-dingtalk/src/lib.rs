#![doc = include_str!("../README.md")]

pub mod extend;
pub mod provider;

mod refresh;

pub use extend::DingTalkExtendSocialite;
pub use provider::DingTalkProvider;
