use clap::Parser;
use claimmap::{Atlas, FontFace, MapError, render_atlas};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Рендер карты владений гильдий: тонировка регионов, контуры, подписи, карты зон
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Путь к набору данных (TOML или JSON)
    #[arg(short, long)]
    config: PathBuf,

    /// Каталог для карт континентов и зон
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Шрифт подписей (перекрывает `render.font_path` набора данных)
    #[arg(short, long)]
    font: Option<PathBuf>,
}

fn run(cli: &Cli) -> Result<(), MapError> {
    info!(config = %cli.config.display(), "loading dataset");
    let atlas = Atlas::from_file(&cli.config)?;

    let font_path = cli
        .font
        .clone()
        .or_else(|| atlas.render.font_path.clone())
        .ok_or_else(|| {
            MapError::InvalidSettings(
                "no label font: set render.font_path or pass --font".to_string(),
            )
        })?;
    let face = FontFace::load(&font_path, atlas.render.font_size)?;

    info!(
        continents = atlas.continents.len(),
        zones = atlas.zones.len(),
        regions = atlas.regions.len(),
        claimants = atlas.claimants.len(),
        "rendering atlas"
    );
    let report = render_atlas(&atlas, &face, &cli.output)?;

    info!(
        continent_maps = report.continent_maps.len(),
        zone_maps = report.zone_maps.len(),
        output = %cli.output.display(),
        "done"
    );
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "map rendering failed");
            ExitCode::FAILURE
        }
    }
}
