//! Isoform CLI - Command-line driver for implicit shapes and line modulations

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use isoform_core::prelude::*;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "isoform")]
#[command(about = "Realize implicit shapes and sample line modulations", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample a value-table modulation at evenly spaced ratios
    Profile {
        /// Values of the table, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        values: Vec<f32>,

        /// Length ratios of the table, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        ratios: Vec<f32>,

        /// Number of samples across [0, 1]
        #[arg(short, long, default_value = "11")]
        samples: usize,
    },

    /// Realize and mesh a sphere
    Sphere {
        /// Sphere radius
        #[arg(short, long, default_value = "1.0")]
        radius: f32,

        /// Samples along the longest bounding box axis
        #[arg(long, default_value = "64")]
        resolution: u32,

        /// Extra samples around the bounding box
        #[arg(long, default_value = "1")]
        padding: u32,
    },

    /// Realize and mesh a tube whose radius follows a modulation along Z
    Tube {
        /// Tube length along Z
        #[arg(short, long, default_value = "4.0")]
        length: f32,

        /// Radius values along the tube, comma separated
        #[arg(long, value_delimiter = ',', default_value = "0.5,1.0,0.5")]
        radii: Vec<f32>,

        /// Length ratios of the radii; evenly spaced if omitted
        #[arg(long, value_delimiter = ',')]
        ratios: Option<Vec<f32>>,

        /// Constant added to every radius
        #[arg(long, default_value = "0.0")]
        offset: f32,

        /// Samples along the longest bounding box axis
        #[arg(long, default_value = "64")]
        resolution: u32,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Profile {
            values,
            ratios,
            samples,
        } => {
            run_profile(values, ratios, samples)?;
        }
        Commands::Sphere {
            radius,
            resolution,
            padding,
        } => {
            let config = VoxelConfig::default()
                .with_resolution(resolution)
                .with_padding(padding);
            run_sphere(radius, config)?;
        }
        Commands::Tube {
            length,
            radii,
            ratios,
            offset,
            resolution,
        } => {
            run_tube(length, radii, ratios, offset, resolution)?;
        }
    }

    Ok(())
}

fn run_profile(values: Vec<f32>, ratios: Vec<f32>, samples: usize) -> Result<()> {
    let profile =
        LineModulation::from_values(values, ratios).context("Invalid value table")?;

    for (i, value) in profile.sample(samples)?.into_iter().enumerate() {
        let ratio = if samples > 1 {
            i as f32 / (samples - 1) as f32
        } else {
            0.0
        };
        println!("{ratio:.4}\t{value:.6}");
    }

    Ok(())
}

fn run_sphere(radius: f32, config: VoxelConfig) -> Result<()> {
    if radius.is_nan() || radius <= 0.0 {
        bail!("Sphere radius must be positive, got {radius}");
    }

    let shape = sphere(Vec3::ZERO, radius).realized_with(VoxelKernel::new(config));
    report(&shape)
}

fn run_tube(
    length: f32,
    radii: Vec<f32>,
    ratios: Option<Vec<f32>>,
    offset: f32,
    resolution: u32,
) -> Result<()> {
    if length.is_nan() || length <= 0.0 {
        bail!("Tube length must be positive, got {length}");
    }

    let ratios = ratios.unwrap_or_else(|| evenly_spaced(radii.len()));
    let max_radius = radii.iter().copied().fold(0.0f32, f32::max) + offset.max(0.0);

    let table = LineModulation::from_values(radii, ratios).context("Invalid radius table")?;
    let radius = table + LineModulation::constant(offset);
    radius
        .validate()
        .context("Radius profile cannot be evaluated along the tube")?;
    tracing::info!(
        kind = ?radius.kind(),
        breakpoints = radius.breakpoints().len(),
        "built radius modulation"
    );

    let bounds = Aabb::new(
        Vec3::new(-max_radius, -max_radius, 0.0),
        Vec3::new(max_radius, max_radius, length),
    );
    let tube = generic(
        move |x, y, z| {
            // The profile passed validate(), so no ratio in [0, 1] fails
            let ratio = (z / length).clamp(0.0, 1.0);
            let r = radius.evaluate(ratio).unwrap_or(0.0);
            // Capped at both ends by the slab 0 <= z <= length
            let side = Vec2::new(x, y).length() - r;
            let caps = (-z).max(z - length);
            side.max(caps)
        },
        bounds,
    );

    let shape = tube.realized_with(VoxelKernel::new(
        VoxelConfig::default().with_resolution(resolution),
    ));
    report(&shape)
}

fn report<S: Implicit>(shape: &ImplicitShape<S>) -> Result<()> {
    let voxels = shape.volume()?;
    println!(
        "Sampled {} voxels ({} inside) at spacing {:.4}",
        voxels.len(),
        voxels.inside_count(shape.kernel().config.iso_level),
        voxels.spacing()
    );

    let mesh = shape.mesh()?;
    println!(
        "Generated mesh: {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    if let Some(bounds) = mesh.bounds() {
        println!("Mesh bounds: {:?} .. {:?}", bounds.min, bounds.max);
    }

    Ok(())
}

fn evenly_spaced(count: usize) -> Vec<f32> {
    match count {
        0 => Vec::new(),
        1 => vec![0.0],
        n => (0..n).map(|i| i as f32 / (n - 1) as f32).collect(),
    }
}
