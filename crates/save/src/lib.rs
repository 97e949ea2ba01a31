//! Ordinance save segment: a framed, checksummed and optionally compressed
//! block holding every ordinance of the active city.

mod atomic_write;
pub mod file_header;
pub mod save_codec;
pub mod save_error;
mod save_plugin;

pub use save_codec::{decode_ordinances, encode_ordinances};
pub use save_error::SaveError;
pub use save_plugin::{
    LoadOrdinancesEvent, OrdinanceSavePlugin, OrdinanceSaveSlot, SaveOrdinancesEvent,
};
