use std::time::Instant;

use anyhow::Result;

use manual_fetch::utils::display_elapsed_time;
use manual_fetch::{ManualCrawler, Settings, logger};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    logger::init();

    let settings = Settings::load()?;
    let mut crawler = ManualCrawler::new(settings)?;

    println!("\n=== manual-fetch ===");
    let start = Instant::now();
    crawler.run().await?;
    display_elapsed_time(start.elapsed());

    Ok(())
}
