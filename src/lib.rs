// Library root
// -----------
// The binary (`main.rs`) wires these modules into the `vkcc` command.
//
// Module responsibilities:
// - `link`: pure URL handling (scheme normalization, vk.cc detection, key
//   extraction).
// - `api`: blocking HTTP calls to the VK `utils.*` methods and envelope
//   decoding.
// - `ui`: the prompt, the shorten/stats sequence and user-facing messages.
// - `config`, `cli`, `error`, `logging`: process plumbing.
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod link;
pub mod logging;
pub mod ui;
