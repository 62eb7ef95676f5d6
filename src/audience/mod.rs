// SPDX-License-Identifier: MIT

pub mod attributes;
pub mod condition;
pub mod content;
pub mod fallback;
pub mod loader;
pub mod server;
pub mod template;
pub mod user;
