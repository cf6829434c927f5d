//! pixeldesk CLI tool
//!
//! Command-line shell over the pixeldesk session core: load, resize, remove
//! background, save.

#[cfg(feature = "cli")]
use pixeldesk::cli;

#[cfg(feature = "cli")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cli::main().await
}

#[cfg(not(feature = "cli"))]
fn main() {
    panic!("CLI feature not enabled. Please rebuild with --features cli");
}
