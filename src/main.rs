use log::{error, info};
use recipe_keeper::{AppConfig, ImportResult, RecipeImporter};
use std::env;

const USAGE: &str = "Usage:
  recipe-keeper scrape <url> [user-id] [recipe-id]
  recipe-keeper convert-image <image-url> <output.png>";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let config = AppConfig::load()?;

    match args.first().map(String::as_str) {
        Some("scrape") => {
            let url = args.get(1).ok_or(USAGE)?;
            let user_id = args.get(2).map_or("local", String::as_str);
            // the page URL is a stable default identifier
            let recipe_id = args.get(3).unwrap_or(url);

            let result = RecipeImporter::builder()
                .config(config)
                .url(url)
                .user_id(user_id)
                .recipe_id(recipe_id)
                .build()
                .await;

            match result {
                Ok(ImportResult::Recipe(recipe)) => {
                    println!("{}", serde_json::to_string_pretty(&recipe)?);
                }
                Ok(ImportResult::Png(_)) => return Err("expected a recipe, got an image".into()),
                Err(e) => {
                    error!("Unable to scrape the recipe from {}: {}", url, e);
                    return Err(e.into());
                }
            }
        }
        Some("convert-image") => {
            let image_url = args.get(1).ok_or(USAGE)?;
            let output = args.get(2).ok_or(USAGE)?;

            let result = RecipeImporter::builder()
                .config(config)
                .image(image_url)
                .build()
                .await?;

            if let ImportResult::Png(png) = result {
                tokio::fs::write(output, &png).await?;
                info!("Wrote {} bytes to {}", png.len(), output);
            }
        }
        _ => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    }

    Ok(())
}
