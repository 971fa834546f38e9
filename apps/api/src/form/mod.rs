// Resume form engine: validation, repeated sections, completion tracking,
// soft length limits and preview rendering, driven through one controller.
// Handlers and the session store are the only parts that know about HTTP.

pub mod completion;
pub mod controller;
pub mod export;
pub mod handlers;
pub mod length_guard;
pub mod preview;
pub mod repeater;
pub mod session;
pub mod validators;
