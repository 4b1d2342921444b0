use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use maposter::models::{AppConfig, PosterLabels};
use maposter::rendering::{build_render_model, render_png, render_svg};
use maposter::services::{fetch_map_data, geocoding, themes, FileCache, FontLibrary, ThemeStore};

#[derive(Parser)]
#[command(name = "maposter")]
#[command(about = "Generate stylized city map posters from OpenStreetMap data")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a map poster for a city
    Generate {
        /// City name
        #[arg(short, long)]
        city: String,

        /// Country name
        #[arg(short = 'C', long)]
        country: String,

        /// Theme name
        #[arg(short, long, default_value = themes::DEFAULT_THEME)]
        theme: String,

        /// Map radius in meters
        #[arg(short, long, default_value_t = 29_000)]
        distance: u32,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Png)]
        format: OutputFormat,

        /// Output file path (defaults to <output_dir>/<city>_<country>_<theme>.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file (YAML)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// List all available themes
    ListThemes {
        /// Configuration file (YAML)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Svg,
    Png,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "maposter=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            city,
            country,
            theme,
            distance,
            format,
            output,
            config,
        } => run_generate(
            &city,
            &country,
            &theme,
            f64::from(distance),
            format,
            output,
            config.as_deref(),
        ),
        Commands::ListThemes { config } => {
            run_list_themes(config.as_deref());
            Ok(())
        }
    }
}

fn run_generate(
    city: &str,
    country: &str,
    theme_name: &str,
    distance: f64,
    format: OutputFormat,
    output: Option<PathBuf>,
    config_path: Option<&Path>,
) -> anyhow::Result<()> {
    let config = AppConfig::load(config_path);

    // Theme resolution happens before any network traffic so a typo fails fast
    let theme = ThemeStore::new(&config.themes_dir).get(theme_name)?;
    tracing::info!(
        theme = %theme.name,
        distance_km = %format!("{:.1}", distance / 1000.0),
        "Generating poster for {city}, {country}"
    );

    let cache = FileCache::new(&config.cache_dir);

    tracing::info!("Looking up coordinates");
    let place = geocoding::lookup(&config, &cache, city, country)?;
    tracing::info!(address = %place.address, "Found");

    let raw = fetch_map_data(&config, &cache, place.coordinates, distance)?;

    let model = build_render_model(&raw, &theme, config.width, config.height);
    let labels = PosterLabels {
        city: city.to_string(),
        country: country.to_string(),
        coordinates: place.coordinates,
    };

    let output_path = output.unwrap_or_else(|| {
        config
            .output_dir
            .join(output_filename(city, country, theme_name, format.extension()))
    });
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    tracing::info!("Rendering {}", format.extension().to_uppercase());
    let fonts = FontLibrary::load(&config.fonts_dir);
    match format {
        OutputFormat::Svg => {
            let svg = render_svg(&model, &theme, &labels, fonts.family());
            std::fs::write(&output_path, svg)?;
        }
        OutputFormat::Png => {
            let png = render_png(&model, &theme, &labels, &fonts)?;
            std::fs::write(&output_path, png)?;
        }
    }

    tracing::info!(path = %output_path.display(), "Poster saved");
    Ok(())
}

fn run_list_themes(config_path: Option<&Path>) {
    let config = AppConfig::load(config_path);
    let store = ThemeStore::new(&config.themes_dir);

    println!("\nAvailable Themes:");
    println!("{}", "-".repeat(60));

    for (name, theme) in store.list() {
        println!("  {name}");
        println!("    {}", theme.name);
        if let Some(description) = &theme.description {
            println!("    {description}");
        }
        println!();
    }
}

/// `<city>_<country>_<theme>.<ext>` with lowercased, underscore-joined slugs.
fn output_filename(city: &str, country: &str, theme_name: &str, extension: &str) -> String {
    format!(
        "{}_{}_{}.{}",
        slugify(city),
        slugify(country),
        theme_name,
        extension
    )
}

fn slugify(value: &str) -> String {
    value
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_filename() {
        assert_eq!(
            output_filename("New York", "USA", "noir", "png"),
            "new_york_usa_noir.png"
        );
        assert_eq!(
            output_filename("Paris", "France", "feature_based", "svg"),
            "paris_france_feature_based.svg"
        );
    }

    #[test]
    fn test_slugify_collapses_whitespace() {
        assert_eq!(slugify("Rio  de   Janeiro"), "rio_de_janeiro");
    }
}
