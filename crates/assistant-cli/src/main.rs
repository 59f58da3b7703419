//! crypto-assistant console REPL
//!
//! Ask free-text questions about cryptocurrencies; answers combine live
//! CoinMarketCap quotes, Newsdata.io headlines and a text generator.

use assistant_cli::{init_tracing, repl, state};
use assistant_runtime::SelectedProvider;
use crypto_assistant::AssistantConfig;
use tokio::io::{BufReader, stdin, stdout};

#[tokio::main]
async fn main() {
    // Load environment
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AssistantConfig::from_env();
    // An unknown LLM_PROVIDER degrades to Gemini; the console always exits 0
    let selected = SelectedProvider::from_env_or_default();
    let assistant = state::bootstrap(&config, selected).await;

    if let Err(e) = repl::run(&assistant, BufReader::new(stdin()), stdout()).await {
        tracing::error!(error = %e, "Console I/O failed");
    }
}
