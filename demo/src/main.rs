use anyhow::Result;
use rxtext::{HeadlessTextView, ObservableExt, Reactive};
use rxtext_demo::{DemoConfig, ViewController, ViewModel};
use tracing::info;

fn main() -> Result<()> {
    let config = DemoConfig::from_env()?;

    // initialize tracing
    tracing_subscriber::fmt().with_max_level(config.log_level).init();

    let mut controller = ViewController::new(ViewModel::default());
    controller.view_did_load(config.input);
    info!(transforms = controller.view_model().transform_count(), deliveries = controller.deliveries().len(), "view loaded");

    // The same path driven by a text control: edits reach every subscriber through one interceptor
    let view = HeadlessTextView::new();
    view.set_string("hello");
    let text = Reactive::new(&view).text();
    let _length = text.clone().map(|text| text.map_or(0, |text| text.chars().count())).subscribe_next(|length| info!(length, "text length"));
    let _echo = text.subscribe_next(|text| info!(?text, "text changed"));
    view.type_text(", world");
    text.sink().on_next(Some("reset".to_string()));
    info!(text = %view.string(), "text assigned through the sink");

    controller.unload();
    Ok(())
}
