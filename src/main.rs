use voinici_quiz::QuizApp;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    pretty_env_logger::init();

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Voinici Quiz",
        options,
        Box::new(|_cc| Ok(Box::new(QuizApp::new()))),
    )
}

#[cfg(target_arch = "wasm32")]
fn main() {
    use eframe::wasm_bindgen::JsCast as _;

    eframe::WebLogger::init(log::LevelFilter::Debug).ok();
    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .expect("no document in wasm environment");

        let canvas = document
            .get_element_by_id("quiz_canvas")
            .expect("no element with id quiz_canvas")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("quiz_canvas is not a canvas element");

        eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|_cc| Ok(Box::new(QuizApp::new()))),
            )
            .await
            .expect("failed to start the quiz widget");
    });
}
