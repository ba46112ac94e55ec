use anyhow::Context;
use lendr_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load lendr settings")?;
    lendr_telemetry::init(&settings.telemetry)?;
    lendr_app::run(&settings).await
}
