pub mod api;
pub mod cards;
pub mod endpoints;
pub mod router;
pub mod user;
mod utils;

use std::sync::LazyLock;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub use api::{ApiClient, ApiConfig, ApiError, ApiRequest, RequestOptions};
pub use router::{Route, RouteMatch, resolve};
pub use user::{USER_ID_KEY, UserId};

// a static so the logger and panic hook are installed once, however many entry points run
static LOGGER: LazyLock<()> = LazyLock::new(|| {
    utils::set_panic_hook();

    #[cfg(target_arch = "wasm32")]
    {
        wasm_logger::init(wasm_logger::Config::default());
        log::info!("Logging initialized");
    }
});

pub(crate) fn init_logging() {
    LazyLock::force(&LOGGER);
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen(start))]
pub fn start() {
    init_logging();
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub fn get_app_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
