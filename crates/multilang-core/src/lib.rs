#![doc = include_str!("../README.md")]

pub mod alias;
pub mod error;
pub mod notifier;
pub mod options;
pub mod payload;
pub mod resolver;
pub mod signals;
pub mod template;

pub use error::{OptionsError, PayloadError};
pub use notifier::{ReadyCallback, ReadyQueue};
pub use options::{LoadedCallback, MultiLangOptions};
pub use payload::{Payload, PayloadFormat};
pub use resolver::{Direction, Identity, canonicalize, resolve};
pub use signals::Signals;
pub use template::fill_placeholders;
