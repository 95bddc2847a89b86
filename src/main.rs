use autodidact::app::Application;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let state_dir = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "state".to_string());

    Application::new(state_dir).run()
}
