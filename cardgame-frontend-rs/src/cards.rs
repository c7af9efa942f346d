use card_utils::{CardDto, CardFace, CardParseError};

/// Where the generated SVGs are served from.
pub const CARD_ASSET_DIR: &str = "/cards";

pub fn asset_url(face: CardFace) -> String {
    format!("{CARD_ASSET_DIR}/{}", face.short_file_name())
}

pub fn dto_asset_url(dto: &CardDto) -> Result<String, CardParseError> {
    Ok(asset_url(dto.face()?))
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn card_asset_url(dto: CardDto) -> Result<String, wasm_bindgen::JsValue> {
    dto_asset_url(&dto).map_err(|e| wasm_bindgen::JsValue::from_str(&e.to_string()))
}
