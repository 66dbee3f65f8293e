mod app;
mod relay;
mod renderer;
mod theme;

pub use app::FolioApp;

// WASM entry point
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas = document
        .get_element_by_id("folio_canvas")
        .ok_or_else(|| JsValue::from_str("no canvas element with id 'folio_canvas'"))?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str("element 'folio_canvas' is not a canvas"))?;

    let web_options = eframe::WebOptions::default();
    wasm_bindgen_futures::spawn_local(async move {
        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| {
                    let settings = Box::new(folio_wasm::LocalStorageSettings::new());
                    let portfolio =
                        folio_core::Portfolio::new(folio_core::SiteConfig::default(), settings);
                    web_sys::console::log_1(
                        &format!("folio: starting in {} mode", portfolio.theme()).into(),
                    );
                    Ok(Box::new(FolioApp::new(cc, portfolio)))
                }),
            )
            .await;
        if let Err(e) = start_result {
            web_sys::console::error_1(&format!("Failed to start eframe: {e:?}").into());
        }
    });
    Ok(())
}
