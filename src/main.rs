use clap::{ArgGroup, Parser};
use log::{debug, error};
use recipe_extract::fetch::RequestFetcher;
use recipe_extract::{EngineConfig, ExtractionFailure, ImportError, RecipeEngine};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;

/// Extract a recipe from a publisher page and print it as JSON.
#[derive(Debug, Parser)]
#[command(name = "recipe-extract", version)]
#[command(about = "Extract a recipe from a publisher page and print it as JSON")]
#[command(group(ArgGroup::new("page_url").args(["url", "locator"]).required(true)))]
struct Args {
    /// Page URL to fetch. With --file, the page's locator.
    url: Option<String>,

    /// Read the page from a saved file instead of fetching it
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Locator of a saved page (same as the positional URL)
    #[arg(long = "url", value_name = "LOCATOR")]
    locator: Option<String>,

    /// Print the diagnostic bundle even when extraction succeeds
    #[arg(long)]
    diagnose: bool,
}

impl Args {
    fn page_url(&self) -> &str {
        self.url.as_deref().or(self.locator.as_deref()).unwrap_or_default()
    }
}

async fn load_page(args: &Args, config: &EngineConfig) -> Result<String, ImportError> {
    match &args.file {
        Some(path) => {
            debug!("Reading page from {}", path.display());
            Ok(tokio::fs::read_to_string(path).await?)
        }
        None => RequestFetcher::new(&config.fetch)?.fetch(args.page_url()).await,
    }
}

fn failure_report(failure: &ExtractionFailure) -> serde_json::Value {
    json!({
        "stage": failure.stage(),
        "error": failure.to_string(),
        "validation": failure.validation(),
        "partialRecipe": failure.partial_recipe(),
        "diagnostics": failure.diagnostics(),
    })
}

async fn run(args: Args) -> Result<bool, ImportError> {
    let url = args.page_url();
    let config = EngineConfig::load()?;
    let content = load_page(&args, &config).await?;
    let engine = RecipeEngine::new(&config);

    let (report, success) = match engine.extract(&content, url) {
        Ok(recipe) if args.diagnose => {
            let bundle = engine.capture_diagnostics(&content, url);
            (json!({ "recipe": recipe, "diagnostics": bundle }), true)
        }
        Ok(recipe) => (json!(recipe), true),
        Err(failure) if args.diagnose && failure.diagnostics().is_none() => {
            let bundle = engine.capture_diagnostics(&content, url);
            (failure_report(&failure.with_diagnostics(bundle)), false)
        }
        Err(failure) => (failure_report(&failure), false),
    };

    match serde_json::to_string_pretty(&report) {
        Ok(text) => println!("{text}"),
        Err(e) => error!("Failed to serialize output: {}", e),
    }
    Ok(success)
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_url() {
        let args = Args::try_parse_from(["recipe-extract", "https://example.com/soup"]).unwrap();
        assert_eq!(args.page_url(), "https://example.com/soup");
        assert!(args.file.is_none());
        assert!(!args.diagnose);
    }

    #[test]
    fn test_saved_page_with_locator() {
        let args = Args::try_parse_from([
            "recipe-extract",
            "--diagnose",
            "--file",
            "page.html",
            "--url",
            "https://example.com/soup",
        ])
        .unwrap();
        assert_eq!(args.page_url(), "https://example.com/soup");
        assert_eq!(args.file, Some(PathBuf::from("page.html")));
        assert!(args.diagnose);
    }

    #[test]
    fn test_url_is_required_once() {
        assert!(Args::try_parse_from(["recipe-extract", "--file", "page.html"]).is_err());
        assert!(Args::try_parse_from([
            "recipe-extract",
            "https://example.com/a",
            "--url",
            "https://example.com/b",
        ])
        .is_err());
    }
}
