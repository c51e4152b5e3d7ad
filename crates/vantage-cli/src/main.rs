//! Vantage CLI - Command-line interface for camera projections

mod report;
mod settings;
mod shell;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use vantage_core::prelude::*;

use crate::report::{OutputReport, format_output, format_viewport};
use crate::settings::Settings;

#[derive(Parser)]
#[command(name = "vantage")]
#[command(about = "Perspective, orthographic and isometric camera projections", long_about = None)]
#[command(version)]
struct Cli {
    /// Settings file (defaults to the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the projection matrix (row-major)
    Matrix {
        #[command(flatten)]
        projection: ProjectionArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the viewport aspect ratio for the projection
    Aspect {
        #[command(flatten)]
        projection: ProjectionArgs,
    },

    /// Project a camera-space point into normalized device coordinates
    Project {
        /// Camera-space X
        #[arg(allow_hyphen_values = true)]
        x: f32,

        /// Camera-space Y
        #[arg(allow_hyphen_values = true)]
        y: f32,

        /// Camera-space Z (the camera looks down -Z)
        #[arg(allow_hyphen_values = true)]
        z: f32,

        #[command(flatten)]
        projection: ProjectionArgs,
    },

    /// Fit the projection's aspect ratio into a render surface
    Viewport {
        /// Surface width in pixels
        width: u32,

        /// Surface height in pixels
        height: u32,

        #[command(flatten)]
        projection: ProjectionArgs,
    },

    /// Write default settings to a file
    Init {
        /// Output file (defaults to the user config directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Interactive projection editor
    Shell {
        /// Surface width
        #[arg(long, default_value = "1280")]
        width: u32,

        /// Surface height
        #[arg(long, default_value = "720")]
        height: u32,
    },
}

/// Overrides applied on top of the loaded settings
#[derive(Args, Debug, Default)]
struct ProjectionArgs {
    /// Projection mode (perspective, orthographic, isometric)
    #[arg(short, long)]
    mode: Option<ProjectionMode>,

    /// Vertical field of view in degrees
    #[arg(long)]
    fov: Option<f32>,

    /// Perspective aspect ratio
    #[arg(long)]
    aspect: Option<f32>,

    /// Near clip distance
    #[arg(long)]
    near: Option<f32>,

    /// Far clip distance
    #[arg(long)]
    far: Option<f32>,

    /// Orthographic view width
    #[arg(long)]
    ortho_width: Option<f32>,

    /// Orthographic view height
    #[arg(long)]
    ortho_height: Option<f32>,
}

impl ProjectionArgs {
    /// Apply overrides to `base`, validating the result
    fn resolve(&self, base: Settings) -> Result<Settings> {
        let mut settings = base;
        if let Some(mode) = self.mode {
            settings.mode = mode;
        }

        let overrides = [
            (Parameter::Fov, self.fov),
            (Parameter::Aspect, self.aspect),
            (Parameter::Near, self.near),
            (Parameter::Far, self.far),
            (Parameter::OrthoWidth, self.ortho_width),
            (Parameter::OrthoHeight, self.ortho_height),
        ];

        // Assign all overrides before validating, so that e.g. raising both
        // near and far past the old far value is accepted
        let mut params = settings.parameters;
        for (parameter, value) in overrides {
            if let Some(value) = value {
                match parameter {
                    Parameter::Fov => params.vertical_fov_degrees = value,
                    Parameter::Aspect => params.aspect_ratio = value,
                    Parameter::Near => params.near_clip = value,
                    Parameter::Far => params.far_clip = value,
                    Parameter::OrthoWidth => params.ortho_width = value,
                    Parameter::OrthoHeight => params.ortho_height = value,
                }
            }
        }
        params.validate().context("Invalid projection parameters")?;

        settings.parameters = params;
        Ok(settings)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.config.as_deref();

    match cli.command {
        Commands::Matrix { projection, json } => {
            let settings = projection.resolve(settings::resolve_settings(config)?)?;
            run_matrix(&settings, json)?;
        }
        Commands::Aspect { projection } => {
            let settings = projection.resolve(settings::resolve_settings(config)?)?;
            println!(
                "{}",
                viewport_aspect_ratio(settings.mode, &settings.parameters)
            );
        }
        Commands::Project { x, y, z, projection } => {
            let settings = projection.resolve(settings::resolve_settings(config)?)?;
            run_project(&settings, Vec3::new(x, y, z))?;
        }
        Commands::Viewport {
            width,
            height,
            projection,
        } => {
            let settings = projection.resolve(settings::resolve_settings(config)?)?;
            let aspect = viewport_aspect_ratio(settings.mode, &settings.parameters);
            println!("{}", format_viewport(&Viewport::fit(width, height, aspect)));
        }
        Commands::Init { output } => {
            run_init(output.as_deref().or(config))?;
        }
        Commands::Shell { width, height } => {
            let settings = settings::resolve_settings(config)?;
            shell::run_shell(settings, (width, height), cli.config.clone())?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_matrix(settings: &Settings, json: bool) -> Result<()> {
    let output = compute_projection(settings.mode, &settings.parameters);
    let aspect = viewport_aspect_ratio(settings.mode, &settings.parameters);

    if json {
        let report = OutputReport::new(settings.mode, settings.parameters, &output, aspect);
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        );
    } else {
        print!("{}", format_output(settings.mode, &output, aspect));
    }

    Ok(())
}

fn run_project(settings: &Settings, point: Vec3) -> Result<()> {
    let output = compute_projection(settings.mode, &settings.parameters);

    let Some(ndc) = project_point(&output.matrix, point) else {
        anyhow::bail!(
            "Point ({}, {}, {}) lies on the camera plane and has no projection",
            point.x,
            point.y,
            point.z
        );
    };

    let inside = ndc.abs().max_element() <= 1.0;
    println!(
        "ndc: ({:.6}, {:.6}, {:.6}){}",
        ndc.x,
        ndc.y,
        ndc.z,
        if inside { "" } else { "  (clipped)" }
    );

    Ok(())
}

fn run_init(output: Option<&Path>) -> Result<()> {
    let path = settings::save_target(output)?;
    settings::save_settings(&Settings::default(), &path)?;
    println!("Wrote default settings to {}", path.display());
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_overrides_validated_together() {
        let args = ProjectionArgs {
            near: Some(3000.0),
            far: Some(5000.0),
            ..Default::default()
        };
        let settings = args.resolve(Settings::default()).unwrap();
        assert_eq!(settings.parameters.near_clip, 3000.0);
        assert_eq!(settings.parameters.far_clip, 5000.0);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let args = ProjectionArgs {
            near: Some(5.0),
            far: Some(5.0),
            ..Default::default()
        };
        assert!(args.resolve(Settings::default()).is_err());
    }

    #[test]
    fn test_parse_matrix_command() {
        let cli = Cli::try_parse_from(["vantage", "matrix", "--mode", "iso", "--ortho-width", "640"])
            .unwrap();
        let Commands::Matrix { projection, json } = cli.command else {
            panic!("expected matrix command");
        };
        assert!(!json);
        assert_eq!(projection.mode, Some(ProjectionMode::Isometric));
        assert_eq!(projection.ortho_width, Some(640.0));
    }

    #[test]
    fn test_parse_negative_point() {
        let cli = Cli::try_parse_from(["vantage", "project", "0", "0", "-10"]).unwrap();
        assert!(matches!(cli.command, Commands::Project { z, .. } if z == -10.0));
    }
}
